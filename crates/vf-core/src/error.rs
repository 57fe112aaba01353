//! Shared error type.
//!
//! Sub-crates define their own enums and wrap `CoreError` through `#[from]`
//! where a core failure can surface.

use thiserror::Error;

/// Base error type for `vf-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `vf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
