//! Innovation toggles for a run.

/// Which care-delivery innovations the facility has, and how much of each.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Innovations {
    pub vr_stations:       u32,
    pub telehealth_rooms:  u32,
    pub ai_triage_enabled: bool,
    /// Carried for reporting; mobile units are not simulated as agents.
    pub mobile_units:       u32,
    /// Carried for reporting; robots are not simulated as agents.
    pub robotic_assistants: u32,
}

impl Default for Innovations {
    fn default() -> Self {
        Self {
            vr_stations:        5,
            telehealth_rooms:   10,
            ai_triage_enabled:  false,
            mobile_units:       0,
            robotic_assistants: 0,
        }
    }
}

impl Innovations {
    /// No innovation capacity at all.
    pub fn none() -> Self {
        Self { vr_stations: 0, telehealth_rooms: 0, ..Self::default() }
    }
}
