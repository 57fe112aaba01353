use thiserror::Error;

use vf_core::PatientId;

/// A failed agent step.  Isolated by the scheduler; never halts a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentFault {
    #[error("patient {0} not found")]
    UnknownPatient(PatientId),

    #[error("{agent} in inconsistent state: {detail}")]
    InconsistentState { agent: String, detail: String },
}

impl AgentFault {
    pub fn inconsistent(agent: impl std::fmt::Display, detail: impl Into<String>) -> Self {
        AgentFault::InconsistentState { agent: agent.to_string(), detail: detail.into() }
    }
}

pub type FaultResult<T> = Result<T, AgentFault>;
