//! Keeps published boss targets attached to their tiles while the board moves.

use std::collections::BTreeSet;

use crate::board::{TileCoord, TileTransformation};

/// Follows targets through a removal plus gravity.
///
/// Targets whose tile was removed are dropped. Survivors fall by one row for
/// every removed tile below them in the same column. Duplicate removals count
/// once.
pub fn remap_after_removal(targets: &[TileCoord], removed: &[TileCoord]) -> Vec<TileCoord> {
    let removed: BTreeSet<TileCoord> = removed.iter().copied().collect();
    targets
        .iter()
        .filter(|target| !removed.contains(*target))
        .map(|target| {
            let below = removed
                .iter()
                .filter(|r| r.column == target.column && r.row < target.row)
                .count();
            TileCoord::new(target.row - below, target.column)
        })
        .collect()
}

/// Follows targets through a rotation's `initial → end` pairs.
///
/// Targets with no pairing stay where they are.
pub fn remap_after_rotation(
    targets: &[TileCoord],
    moves: &[TileTransformation],
) -> Vec<TileCoord> {
    targets
        .iter()
        .map(|&target| {
            moves
                .iter()
                .find(|m| m.initial == target)
                .map_or(target, |m| m.end)
        })
        .collect()
}
