//! Facility error type.

use thiserror::Error;

/// Errors raised while building or validating the facility.
#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("area {0:?} declared twice")]
    DuplicateArea(String),

    #[error("area {0:?} not found in topology")]
    UnknownArea(String),

    #[error("required area {0:?} missing from topology")]
    MissingArea(&'static str),

    #[error("area {0:?} is not reachable from the entrance")]
    Unreachable(&'static str),

    #[error("topology exceeds {max} areas", max = u16::MAX - 1)]
    TooManyAreas,
}

pub type FacilityResult<T> = Result<T, FacilityError>;
