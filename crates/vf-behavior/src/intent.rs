//! Peer intents — effects one patient has on other patients.

use vf_core::PatientId;
use vf_agent::Patient;

/// Word-of-mouth effect carried by an [`Intent::Influence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeerEffect {
    /// A good VR session convinces the target to try VR.
    AdoptVr { tech_comfort_boost: f64 },
    /// A walkout sours the target's view of the facility.
    Dissatisfy { amount: f64 },
}

/// An action that an agent requests on agents it cannot borrow directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Influence {
        from:    PatientId,
        targets: Vec<PatientId>,
        effect:  PeerEffect,
    },
}

/// Apply `intents` to `patients` (indexed by `PatientId`).  Unknown targets
/// are skipped.  Returns the number of patients affected.
pub fn apply_intents(intents: Vec<Intent>, patients: &mut [Patient]) -> usize {
    let mut touched = 0;
    for intent in intents {
        match intent {
            Intent::Influence { from, targets, effect } => {
                for target in targets {
                    if target == from {
                        continue;
                    }
                    let Some(p) = patients.get_mut(target.index()) else { continue };
                    match effect {
                        PeerEffect::AdoptVr { tech_comfort_boost } => {
                            p.vr_willing = true;
                            p.tech_comfort = (p.tech_comfort + tech_comfort_boost).min(100.0);
                        }
                        PeerEffect::Dissatisfy { amount } => p.adjust_satisfaction(-amount),
                    }
                    touched += 1;
                }
            }
        }
    }
    touched
}
