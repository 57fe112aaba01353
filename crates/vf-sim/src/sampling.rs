//! Bounded agent samples for visualisation.

use vf_agent::{AgentStore, Patient, Provider};
use vf_core::Position;
use vf_facility::FacilityTopology;

/// Patients take this share of a sample; providers fill the rest.
const PATIENT_SHARE_NUM: usize = 4;
const PATIENT_SHARE_DEN: usize = 5;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentKind {
    Patient,
    Provider,
}

/// Flat, display-ready view of one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSummary {
    pub id:           String,
    pub kind:         AgentKind,
    /// Journey state for patients, activity for providers.
    pub state:        String,
    pub location:     Option<String>,
    pub position:     Position,
    pub satisfaction: f64,
    pub wait_time:    Option<u64>,
    pub stress:       Option<f64>,
    pub condition:    Option<String>,
    pub specialty:    Option<String>,
}

impl AgentSummary {
    pub fn of_patient(p: &Patient, topology: &FacilityTopology) -> Self {
        Self {
            id:           p.id.to_string(),
            kind:         AgentKind::Patient,
            state:        p.state.to_string(),
            location:     p.location.and_then(|a| topology.name(a)).map(str::to_owned),
            position:     p.position,
            satisfaction: p.satisfaction(),
            wait_time:    Some(p.wait_time),
            stress:       None,
            condition:    Some(p.condition.to_string()),
            specialty:    None,
        }
    }

    pub fn of_provider(p: &Provider, topology: &FacilityTopology) -> Self {
        Self {
            id:           p.id.to_string(),
            kind:         AgentKind::Provider,
            state:        p.activity.to_string(),
            location:     p.station.and_then(|a| topology.name(a)).map(str::to_owned),
            position:     p.position,
            satisfaction: p.satisfaction,
            wait_time:    None,
            stress:       Some(p.stress),
            condition:    None,
            specialty:    Some(p.specialty.to_string()),
        }
    }
}

/// Up to `limit` agents: live patients first (at most four fifths of the
/// limit), then providers to fill the remainder.
pub fn sample_agents(agents: &AgentStore, topology: &FacilityTopology, limit: usize) -> Vec<AgentSummary> {
    let patient_slots = limit * PATIENT_SHARE_NUM / PATIENT_SHARE_DEN;
    let mut out: Vec<AgentSummary> = agents
        .live_patients()
        .take(patient_slots)
        .map(|p| AgentSummary::of_patient(p, topology))
        .collect();
    let provider_slots = limit - out.len();
    out.extend(
        agents
            .providers
            .iter()
            .take(provider_slots)
            .map(|p| AgentSummary::of_provider(p, topology)),
    );
    out
}
