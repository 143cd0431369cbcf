use std::collections::BTreeSet;

use super::attack::{BossAttack, LineAttack};
use crate::board::{Board, TileCoord};

/// Re-checks planned attacks against a fresh board.
///
/// A point attack whose tile became illegal moves to the first legal
/// orthogonal neighbor, then the first legal diagonal one; with no legal tile
/// one hop away it fizzles and is dropped. Line attacks recompute their cells
/// and are dropped if none remain. Earlier attacks claim their cells before
/// later ones are checked.
pub fn validate_and_update_planned_attacks(
    board: &Board,
    planned: &[BossAttack],
) -> Vec<BossAttack> {
    let protected = board.non_attackable();
    let mut claimed: BTreeSet<TileCoord> = BTreeSet::new();
    let legal = |coord: TileCoord, claimed: &BTreeSet<TileCoord>| {
        board.contains(coord) && !protected.contains(&coord) && !claimed.contains(&coord)
    };

    let mut validated = Vec::with_capacity(planned.len());
    for attack in planned {
        let repaired = match attack {
            BossAttack::Bomb(coord) => {
                relocate(*coord, |c| legal(c, &claimed)).map(BossAttack::Bomb)
            }
            BossAttack::Spawn { coord, monster } => relocate(*coord, |c| legal(c, &claimed))
                .map(|coord| BossAttack::Spawn {
                    coord,
                    monster: *monster,
                }),
            BossAttack::Hair(line) => refresh_line(board, line, |c| legal(c, &claimed))
                .map(BossAttack::Hair),
            BossAttack::Destroy(line) => refresh_line(board, line, |c| legal(c, &claimed))
                .map(BossAttack::Destroy),
        };

        match repaired {
            Some(attack) => {
                claimed.extend(attack.coords());
                validated.push(attack);
            }
            None => tracing::warn!(?attack, "planned boss attack fizzled"),
        }
    }

    validated
}

fn relocate(coord: TileCoord, legal: impl Fn(TileCoord) -> bool) -> Option<TileCoord> {
    if legal(coord) {
        return Some(coord);
    }
    let moved = coord
        .orthogonal_neighbors()
        .chain(coord.diagonal_neighbors())
        .find(|&c| legal(c))?;
    tracing::debug!(from = %coord, to = %moved, "boss attack relocated");
    Some(moved)
}

fn refresh_line(
    board: &Board,
    attack: &LineAttack,
    legal: impl Fn(TileCoord) -> bool,
) -> Option<LineAttack> {
    let cells: BTreeSet<TileCoord> = board
        .line_coords(attack.line)
        .into_iter()
        .filter(|&c| legal(c))
        .collect();

    (!cells.is_empty()).then(|| LineAttack {
        line: attack.line,
        cells,
    })
}
