use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("shift list has {got} entries but the provider mix has {expected} providers")]
    ShiftCountMismatch { expected: usize, got: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;
