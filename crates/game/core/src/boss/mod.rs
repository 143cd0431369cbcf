//! Boss encounter AI.
//!
//! The boss runs its own cycle on top of the main turn phases:
//! targets what to eat → eats → targets what to attack → attacks → rests.
//! Each `.newTurn` input advances it by one step. Target and attack selection
//! are pure functions over a board snapshot plus an exclusion set; the
//! controller only sequences them and returns the inputs to emit.
mod attack;
mod controller;
mod error;
mod remap;
mod state;
mod targeting;
mod validate;

pub use attack::{BossAttack, BossAttackType, LineAttack, MonsterPool, select_attack_types};
pub use controller::{BossController, BossEffects, BossPublication, WorkingLists, enter_state};
pub use error::{BossError, SelectionError};
pub use remap::{remap_after_removal, remap_after_rotation};
pub use state::BossAttackState;
pub use targeting::{AttackPlanner, choose_eat_targets, sample_point};
pub use validate::validate_and_update_planned_attacks;
