use std::fmt;

/// Board cell identifier expressed as `(row, column)`.
///
/// Row 0 is the bottom of the board; gravity pulls tiles towards lower rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub row: usize,
    pub column: usize,
}

impl TileCoord {
    pub const ORIGIN: Self = Self { row: 0, column: 0 };

    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Offsets this coordinate, returning `None` if either axis would go negative.
    pub fn offset(self, rows: isize, columns: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(rows)?,
            column: self.column.checked_add_signed(columns)?,
        })
    }

    /// Neighbors sharing an edge, in up/down/left/right order.
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = TileCoord> {
        [(1, 0), (-1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Neighbors sharing only a corner.
    pub fn diagonal_neighbors(self) -> impl Iterator<Item = TileCoord> {
        [(1, -1), (1, 1), (-1, -1), (-1, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Chebyshev (king-move) distance.
    pub fn chebyshev_distance(self, other: TileCoord) -> usize {
        self.row.abs_diff(other.row).max(self.column.abs_diff(other.column))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A full row or column of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    pub fn contains(self, coord: TileCoord) -> bool {
        match self {
            Line::Row(row) => coord.row == row,
            Line::Column(column) => coord.column == column,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {row}"),
            Line::Column(column) => write!(f, "column {column}"),
        }
    }
}
