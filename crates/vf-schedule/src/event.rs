//! Data-only deferred events.

use vf_core::{PatientId, ProviderId, Tick};

/// What happens when a deferred event comes due.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// The provider's break ends; it becomes idle if still on break.
    ReturnFromBreak,
    /// The provider's treatment of `patient` finishes.
    TreatmentComplete { patient: PatientId },
}

/// One scheduled continuation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferredEvent {
    pub due:      Tick,
    pub provider: ProviderId,
    pub kind:     EventKind,
}

impl DeferredEvent {
    pub fn new(due: Tick, provider: ProviderId, kind: EventKind) -> Self {
        Self { due, provider, kind }
    }
}
