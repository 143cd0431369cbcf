//! Common error infrastructure for shaft-core.
//!
//! Shared severity classification lives here together with [`BoardError`];
//! boss-specific errors are defined next to the boss controller.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No panics**: Board invariants the caller must uphold are still reported
//!   as [`ErrorSeverity::Fatal`] errors rather than crashing the process

use crate::board::TileCoord;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The caller can continue with a degraded result
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The external board is corrupted, the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - a partial result is usable.
    ///
    /// Examples: fewer edible rocks than requested, no free line for a beam
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: coordinate outside the board, ragged board rows
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - board invariant violated, cannot continue.
    ///
    /// Examples: no player tile on the board
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates corrupted state or a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all shaft-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while building or reading a board snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no player tile")]
    MissingPlayer,

    #[error("board must not be empty")]
    Empty,

    #[error("board row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("board is {rows}x{columns}, edges are capped at {max}")]
    TooLarge {
        rows: usize,
        columns: usize,
        max: usize,
    },

    #[error("board has {found} tiles, expected {expected}")]
    TileCount { expected: usize, found: usize },

    #[error("coordinate {coord} is outside a {rows}x{columns} board")]
    OutOfBounds {
        coord: TileCoord,
        rows: usize,
        columns: usize,
    },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingPlayer => ErrorSeverity::Fatal,
            Self::Empty
            | Self::RaggedRow { .. }
            | Self::TooLarge { .. }
            | Self::TileCount { .. }
            | Self::OutOfBounds { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPlayer => "BOARD_MISSING_PLAYER",
            Self::Empty => "BOARD_EMPTY",
            Self::RaggedRow { .. } => "BOARD_RAGGED_ROW",
            Self::TooLarge { .. } => "BOARD_TOO_LARGE",
            Self::TileCount { .. } => "BOARD_TILE_COUNT",
            Self::OutOfBounds { .. } => "BOARD_OUT_OF_BOUNDS",
        }
    }
}
