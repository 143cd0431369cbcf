//! Error types surfaced by the session API.
//!
//! Wraps failures from the boss controller so clients can bubble them up with
//! consistent context.
use shaft_core::{BossError, ErrorSeverity, GameError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("boss step failed")]
    Boss(#[from] BossError),
}

impl RuntimeError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Boss(inner) => inner.severity(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Boss(inner) => inner.error_code(),
        }
    }
}
