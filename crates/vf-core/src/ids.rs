//! Strongly typed identifier wrappers.
//!
//! IDs are `Copy + Ord + Hash` so they work as map keys and in sorted
//! collections.  The inner integer is `pub`; prefer `.index()` when using an
//! ID to address a `Vec`.
//!
//! Each ID displays with a lowercase prefix (`patient_12`, `provider_3`),
//! which is also the external string form used in agent summaries and
//! insight evidence.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Prefix used by the `Display` form.
            pub const PREFIX: &'static str = $prefix;
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Unique patient identity within one run.  Never reused, including
    /// after a patient is discharged or walks out.
    pub struct PatientId(u32) => "patient";
}

typed_id! {
    /// Provider identity.  Providers live for the whole run.
    pub struct ProviderId(u32) => "provider";
}

typed_id! {
    /// Index of an area in the facility topology.
    pub struct AreaId(u16) => "area";
}
