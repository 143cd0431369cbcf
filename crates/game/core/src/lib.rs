//! Turn sequencing and boss AI for the shaft dungeon crawler.
//!
//! `shaft-core` owns the deterministic parts of a turn: the [`InputQueue`]
//! that admits inputs and walks the [`Phase`] machine, and the
//! [`BossController`] that runs the boss cycle on top of it. Board snapshots
//! are produced elsewhere (the board builder and referee) and only read here.
//! Supporting crates depend on the types re-exported below.
pub mod board;
pub mod boss;
pub mod config;
pub mod error;
pub mod input;

#[cfg(test)]
mod test_support;

pub use board::{
    Board, Color, Item, ItemKind, Line, MonsterData, MonsterKind, PlayerData, TileCoord,
    TileTransformation, TileType, Transformation,
};
pub use boss::{
    AttackPlanner, BossAttack, BossAttackState, BossAttackType, BossController, BossEffects,
    BossError, BossPublication, LineAttack, MonsterPool, SelectionError, WorkingLists,
    choose_eat_targets, enter_state, remap_after_removal, remap_after_rotation, sample_point,
    select_attack_types, validate_and_update_planned_attacks,
};
pub use config::{BossConfig, GameConfig};
pub use error::{BoardError, ErrorSeverity, GameError};
pub use input::{Input, InputKind, InputQueue, InputTag, NoopHook, Phase, PhaseHook};
