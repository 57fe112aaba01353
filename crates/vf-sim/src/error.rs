use thiserror::Error;

use vf_agent::AgentError;
use vf_core::CoreError;
use vf_facility::FacilityError;
use vf_schedule::ScheduleError;

/// Construction failures.  Runtime faults inside `step()` are logged and
/// counted, never returned.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("facility: {0}")]
    Facility(#[from] FacilityError),

    #[error("roster: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("population: {0}")]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;
