//! Board builders shared by unit tests.

use crate::board::{Board, Color, TileCoord, TileType};

/// `rows x columns` board of red rocks with a player and optional pillars.
pub(crate) fn rock_board(
    rows: usize,
    columns: usize,
    player: TileCoord,
    pillars: &[TileCoord],
) -> Board {
    let mut board = Board::filled(rows, columns, TileType::rock(Color::Red)).unwrap();
    board.set(player, TileType::player(10)).unwrap();
    for &pillar in pillars {
        board.set(pillar, TileType::pillar(Color::Blue, 3)).unwrap();
    }
    board
}

/// Board of empty tiles with red rocks only at `rocks`.
pub(crate) fn sparse_rock_board(rows: usize, columns: usize, rocks: &[TileCoord]) -> Board {
    let mut board = Board::filled(rows, columns, TileType::Empty).unwrap();
    for &rock in rocks {
        board.set(rock, TileType::rock(Color::Red)).unwrap();
    }
    board
}
