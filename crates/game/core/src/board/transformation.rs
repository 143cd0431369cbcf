use super::TileCoord;
use crate::input::InputTag;

/// One tile's movement during a board transformation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileTransformation {
    pub initial: TileCoord,
    pub end: TileCoord,
}

impl TileTransformation {
    pub const fn new(initial: TileCoord, end: TileCoord) -> Self {
        Self { initial, end }
    }
}

/// Result of the referee/board applying one input to the board.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transformation {
    /// Kind of input that caused this transformation.
    pub cause: Option<InputTag>,

    /// Cells whose tiles were removed (before gravity was applied).
    pub removed: Vec<TileCoord>,

    /// Where surviving tiles moved to.
    pub tile_transformations: Vec<TileTransformation>,
}

impl Transformation {
    pub fn caused_by(cause: InputTag) -> Self {
        Self {
            cause: Some(cause),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_removed(mut self, removed: Vec<TileCoord>) -> Self {
        self.removed = removed;
        self
    }

    #[must_use]
    pub fn with_tile_transformations(mut self, moves: Vec<TileTransformation>) -> Self {
        self.tile_transformations = moves;
        self
    }
}
