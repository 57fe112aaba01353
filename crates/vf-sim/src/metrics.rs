//! Read-side aggregates over the agent population.
//!
//! Every function here is pure.  Averages run over the whole store,
//! including discharged and walked-out patients, so a finished patient
//! keeps counting toward the run's wait and satisfaction figures.

use vf_agent::{AgentStore, Condition, Patient, PatientState};
use vf_behavior::FlowCounters;
use vf_core::Tick;
use vf_facility::FacilityState;

/// Base cost of a visit, in dollars.
pub const BASE_VISIT_COST: f64 = 150.0;
/// Added cost per VR session.
pub const VR_SESSION_COST: f64 = 50.0;
/// Added cost per telehealth session.
pub const TELEHEALTH_SESSION_COST: f64 = 25.0;

/// Average satisfaction reported for an empty store.
const NEUTRAL_SATISFACTION: f64 = 50.0;

/// One point-in-time reading of the run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub tick:                          Tick,
    pub patients_waiting:              usize,
    pub avg_wait_time:                 f64,
    pub avg_satisfaction:              f64,
    /// Share of providers that are not available (treating, on break, or
    /// off shift), in `[0, 1]`.
    pub provider_utilization:          f64,
    pub vr_sessions_completed:         u64,
    pub telehealth_sessions_completed: u64,
    pub patients_treated:              u64,
    pub left_without_treatment:        u64,
    /// Walkouts over all finished journeys, in `[0, 1]`.
    pub lwot_rate:                     f64,
    /// Percent of mental-health patients who reached treatment.
    pub mental_health_access_pct:      f64,
    pub cost_per_visit:                f64,
    pub arrivals:                      u64,
    /// Agents the scheduler will step next tick.
    pub live_agents:                   usize,
}

/// Mean wait over `patients`, or `0.0` when there are none.
pub fn average_wait(patients: &[Patient]) -> f64 {
    if patients.is_empty() {
        return 0.0;
    }
    patients.iter().map(|p| p.wait_time as f64).sum::<f64>() / patients.len() as f64
}

pub fn average_satisfaction(patients: &[Patient]) -> f64 {
    if patients.is_empty() {
        return NEUTRAL_SATISFACTION;
    }
    patients.iter().map(Patient::satisfaction).sum::<f64>() / patients.len() as f64
}

pub fn provider_utilization(agents: &AgentStore) -> f64 {
    if agents.providers.is_empty() {
        return 0.0;
    }
    let busy = agents.providers.iter().filter(|p| !p.is_available()).count();
    busy as f64 / agents.providers.len() as f64
}

pub fn mental_health_access_pct(patients: &[Patient]) -> f64 {
    let (reached, total) = patients
        .iter()
        .filter(|p| p.condition == Condition::MentalHealth)
        .fold((0usize, 0usize), |(reached, total), p| {
            let got_care = matches!(p.state, PatientState::Treatment | PatientState::Discharged);
            (reached + got_care as usize, total + 1)
        });
    if total == 0 {
        return 0.0;
    }
    reached as f64 / total as f64 * 100.0
}

/// `150 + (vr × 50 + telehealth × 25) / max(treated, 1)`.
pub fn cost_per_visit(counters: &FlowCounters) -> f64 {
    let innovation = counters.vr_sessions as f64 * VR_SESSION_COST
        + counters.telehealth_sessions as f64 * TELEHEALTH_SESSION_COST;
    BASE_VISIT_COST + innovation / counters.treated.max(1) as f64
}

pub fn lwot_rate(counters: &FlowCounters) -> f64 {
    let finished = counters.treated + counters.left_without_treatment;
    if finished == 0 {
        return 0.0;
    }
    counters.left_without_treatment as f64 / finished as f64
}

/// Build a snapshot.  Reads only.
pub fn collect(
    tick:        Tick,
    agents:      &AgentStore,
    facility:    &FacilityState,
    counters:    &FlowCounters,
    live_agents: usize,
) -> MetricsSnapshot {
    MetricsSnapshot {
        tick,
        patients_waiting: facility.waiting_room.len(),
        avg_wait_time: average_wait(&agents.patients),
        avg_satisfaction: average_satisfaction(&agents.patients),
        provider_utilization: provider_utilization(agents),
        vr_sessions_completed: counters.vr_sessions,
        telehealth_sessions_completed: counters.telehealth_sessions,
        patients_treated: counters.treated,
        left_without_treatment: counters.left_without_treatment,
        lwot_rate: lwot_rate(counters),
        mental_health_access_pct: mental_health_access_pct(&agents.patients),
        cost_per_visit: cost_per_visit(counters),
        arrivals: counters.arrivals,
        live_agents,
    }
}
