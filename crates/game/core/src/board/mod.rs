//! Read-only board model.
//!
//! The board is owned and mutated by the external referee/board builder. This
//! crate only reads snapshots of it: every [`crate::Input`] that carries a board
//! carries an immutable copy.
mod coord;
mod grid;
mod tile;
mod transformation;

pub use coord::{Line, TileCoord};
pub use grid::Board;
pub use tile::{Color, Item, ItemKind, MonsterData, MonsterKind, PlayerData, TileType};
pub use transformation::{TileTransformation, Transformation};
