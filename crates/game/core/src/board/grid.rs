use std::collections::BTreeSet;

use super::{Line, TileCoord, TileType};
use crate::config::GameConfig;
use crate::error::BoardError;

/// Immutable-by-convention snapshot of the play field.
///
/// Tiles are stored row-major with row 0 at the bottom. Deserialized boards
/// go through the same dimension checks as the constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBoard")
)]
pub struct Board {
    rows: usize,
    columns: usize,
    tiles: Vec<TileType>,
}

/// Unchecked wire shape of a [`Board`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
struct RawBoard {
    rows: usize,
    columns: usize,
    tiles: Vec<TileType>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        check_dimensions(raw.rows, raw.columns)?;
        let expected = raw.rows * raw.columns;
        if raw.tiles.len() != expected {
            return Err(BoardError::TileCount {
                expected,
                found: raw.tiles.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            columns: raw.columns,
            tiles: raw.tiles,
        })
    }
}

fn check_dimensions(rows: usize, columns: usize) -> Result<(), BoardError> {
    if rows == 0 || columns == 0 {
        return Err(BoardError::Empty);
    }
    let max = GameConfig::MAX_BOARD_EDGE;
    if rows > max || columns > max {
        return Err(BoardError::TooLarge { rows, columns, max });
    }
    Ok(())
}

impl Board {
    /// Creates a `rows x columns` board filled with `fill`.
    pub fn filled(rows: usize, columns: usize, fill: TileType) -> Result<Self, BoardError> {
        check_dimensions(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            tiles: vec![fill; rows * columns],
        })
    }

    /// Builds a board from nested rows, bottom row first.
    pub fn from_rows(rows: Vec<Vec<TileType>>) -> Result<Self, BoardError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        let row_count = rows.len();
        check_dimensions(row_count, columns)?;

        let mut tiles = Vec::with_capacity(row_count * columns);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns {
                return Err(BoardError::RaggedRow {
                    row: index,
                    expected: columns,
                    found: row.len(),
                });
            }
            tiles.extend(row);
        }

        Ok(Self {
            rows: row_count,
            columns,
            tiles,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }

    pub fn get(&self, coord: TileCoord) -> Option<&TileType> {
        self.index(coord).map(|index| &self.tiles[index])
    }

    /// Replaces a tile. Used by board builders and tests; the core never mutates
    /// a snapshot it received.
    pub fn set(&mut self, coord: TileCoord, tile: TileType) -> Result<(), BoardError> {
        let index = self.index(coord).ok_or(BoardError::OutOfBounds {
            coord,
            rows: self.rows,
            columns: self.columns,
        })?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| TileCoord::new(row, col)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &TileType)> + '_ {
        self.coords().zip(self.tiles.iter())
    }

    /// Coordinates covered by a row or column; empty if the index is off-board.
    pub fn line_coords(&self, line: Line) -> Vec<TileCoord> {
        match line {
            Line::Row(row) if row < self.rows => {
                (0..self.columns).map(|col| TileCoord::new(row, col)).collect()
            }
            Line::Column(col) if col < self.columns => {
                (0..self.rows).map(|row| TileCoord::new(row, col)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Locates the player tile.
    pub fn player_coord(&self) -> Result<TileCoord, BoardError> {
        self.iter()
            .find(|(_, tile)| tile.is_player())
            .map(|(coord, _)| coord)
            .ok_or(BoardError::MissingPlayer)
    }

    /// Cells no boss attack may ever occupy: the player, pillars and exits.
    pub fn non_attackable(&self) -> BTreeSet<TileCoord> {
        self.coords_where(|tile| tile.is_player() || tile.is_pillar() || tile.is_exit())
    }

    pub fn coords_where(&self, predicate: impl Fn(&TileType) -> bool) -> BTreeSet<TileCoord> {
        self.iter()
            .filter(|(_, tile)| predicate(tile))
            .map(|(coord, _)| coord)
            .collect()
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row * self.columns + coord.column)
    }
}
