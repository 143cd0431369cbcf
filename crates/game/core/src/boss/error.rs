use crate::board::TileCoord;
use crate::error::{BoardError, ErrorSeverity, GameError};

/// A selection constraint could not be fully satisfied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("requested {requested} targets but only {} were available", .partial.len())]
    InsufficientCandidates {
        requested: usize,
        partial: Vec<TileCoord>,
    },

    #[error("no free {orientation} left to attack")]
    NoFreeLine { orientation: &'static str },
}

impl SelectionError {
    /// Whatever was selected before the candidates ran out.
    pub fn into_partial(self) -> Vec<TileCoord> {
        match self {
            Self::InsufficientCandidates { partial, .. } => partial,
            Self::NoFreeLine { .. } => Vec::new(),
        }
    }
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientCandidates { .. } => "SELECTION_INSUFFICIENT_CANDIDATES",
            Self::NoFreeLine { .. } => "SELECTION_NO_FREE_LINE",
        }
    }
}

/// Errors surfaced by [`super::BossController`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BossError {
    #[error("boss has not received a board yet")]
    NoBoard,

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl GameError for BossError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoBoard => ErrorSeverity::Validation,
            Self::Board(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoBoard => "BOSS_NO_BOARD",
            Self::Board(inner) => inner.error_code(),
        }
    }
}
