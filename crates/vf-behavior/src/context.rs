//! Mutable shared state handed to each agent step.

use vf_core::{SimRng, Tick};
use vf_facility::FacilityState;
use vf_schedule::EventQueue;

/// Run-wide flow counters, incremented by agent steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowCounters {
    pub arrivals:              u64,
    pub treated:               u64,
    pub left_without_treatment: u64,
    pub vr_sessions:           u64,
    pub telehealth_sessions:   u64,
    pub ai_triage_assessments: u64,
    pub treatments_started:    u64,
    pub treatments_completed:  u64,
    pub breaks_taken:          u64,
}

/// Everything an agent may touch besides itself and its peers.
///
/// Built by the scheduler once per tick and lent to each agent in turn.
pub struct StepContext<'a> {
    pub tick: Tick,
    /// Hour of day for `tick`.
    pub hour: u32,
    pub facility: &'a mut FacilityState,
    pub events:   &'a mut EventQueue,
    pub rng:      &'a mut SimRng,
    pub counters: &'a mut FlowCounters,
    pub ai_triage_enabled: bool,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(
        tick:     Tick,
        hour:     u32,
        facility: &'a mut FacilityState,
        events:   &'a mut EventQueue,
        rng:      &'a mut SimRng,
        counters: &'a mut FlowCounters,
    ) -> Self {
        Self { tick, hour, facility, events, rng, counters, ai_triage_enabled: false }
    }

    pub fn with_ai_triage(mut self, enabled: bool) -> Self {
        self.ai_triage_enabled = enabled;
        self
    }
}
