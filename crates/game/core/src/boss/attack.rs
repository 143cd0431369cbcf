use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{Color, Line, MonsterKind, TileCoord, TileType};

/// Attack kind derived from one eaten rock, before it has a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossAttackType {
    /// Red rock: a bomb dropped on one tile.
    Dynamite,
    /// Blue rock: a poison hair beam across a row or column.
    Poison,
    /// Purple rock: summons a monster.
    SpawnMonster(MonsterKind),
    /// Brown rock: crushes a whole row or column.
    Destroy,
}

/// A row or column hazard and the cells on it the hazard occupies.
///
/// Protected cells (player, pillars, exits) never appear in `cells`; whether
/// the player is hit is decided by `line` alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineAttack {
    pub line: Line,
    pub cells: BTreeSet<TileCoord>,
}

/// A fully targeted boss attack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossAttack {
    Hair(LineAttack),
    Destroy(LineAttack),
    Spawn {
        coord: TileCoord,
        monster: MonsterKind,
    },
    Bomb(TileCoord),
}

impl BossAttack {
    /// Every cell this attack claims.
    pub fn coords(&self) -> Vec<TileCoord> {
        match self {
            BossAttack::Hair(line) | BossAttack::Destroy(line) => {
                line.cells.iter().copied().collect()
            }
            BossAttack::Spawn { coord, .. } | BossAttack::Bomb(coord) => vec![*coord],
        }
    }

    pub fn line(&self) -> Option<Line> {
        match self {
            BossAttack::Hair(attack) | BossAttack::Destroy(attack) => Some(attack.line),
            _ => None,
        }
    }
}

/// Round-robin over shuffled spawnable monsters.
///
/// No species repeats until every species has been handed out once in the
/// current shuffle.
#[derive(Clone, Debug, Default)]
pub struct MonsterPool {
    remaining: Vec<MonsterKind>,
}

impl MonsterPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MonsterKind {
        if self.remaining.is_empty() {
            self.remaining = MonsterKind::SPAWNABLE.to_vec();
            self.remaining.shuffle(rng);
        }
        // Refilled above from a non-empty constant.
        self.remaining.pop().unwrap_or(MonsterKind::Rat)
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

/// Maps eaten rocks to attack kinds, preserving order.
///
/// Red → dynamite, blue → poison, purple → spawn, brown → destroy. Non-rocks
/// and green rocks produce nothing.
pub fn select_attack_types<R: Rng + ?Sized>(
    eaten: &[TileType],
    pool: &mut MonsterPool,
    rng: &mut R,
) -> Vec<BossAttackType> {
    eaten
        .iter()
        .filter_map(|tile| {
            let attack = match tile.rock_color()? {
                Color::Red => BossAttackType::Dynamite,
                Color::Blue => BossAttackType::Poison,
                Color::Purple => BossAttackType::SpawnMonster(pool.next(rng)),
                Color::Brown => BossAttackType::Destroy,
                Color::Green => {
                    tracing::debug!("green rock has no boss attack");
                    return None;
                }
            };
            Some(attack)
        })
        .collect()
}
