//! Event types for different topics.

use serde::{Deserialize, Serialize};
use shaft_core::{BossAttack, BossAttackState, InputTag, Phase, TileCoord};

/// Turn sequencing events (lightweight, tags only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// An input was queued.
    Admitted { input: InputTag, phase: Phase },

    /// The active phase rejected an input.
    Dropped { input: InputTag, phase: Phase },

    /// An input was popped and the phase advanced (possibly to itself).
    Popped { input: InputTag, from: Phase, to: Phase },

    /// An input was popped but had no transition from the active phase.
    Drained { input: InputTag, phase: Phase },
}

/// Boss controller events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossEvent {
    StateChanged {
        from: BossAttackState,
        to: BossAttackState,
    },

    /// Published eat targets changed; views redraw reticles.
    TargetsChanged(Vec<TileCoord>),

    /// Published planned attacks changed.
    AttacksChanged(Vec<BossAttack>),
}
