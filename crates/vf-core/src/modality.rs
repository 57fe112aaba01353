//! Treatment modality shared by the behaviour and metrics crates.

/// How a patient's treatment was delivered.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Modality {
    /// In-person care with a provider.
    #[default]
    Traditional,
    /// Virtual-reality therapy session; consumes a VR station for the tick.
    Vr,
    /// Remote consultation; consumes a telehealth room for the tick.
    Telehealth,
}

impl Modality {
    /// `true` for the two innovation pathways.
    #[inline]
    pub fn is_innovation(self) -> bool {
        !matches!(self, Modality::Traditional)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Traditional => "traditional",
            Modality::Vr => "vr",
            Modality::Telehealth => "telehealth",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
