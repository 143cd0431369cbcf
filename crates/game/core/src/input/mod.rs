//! Turn sequencing: inputs, phases and the input queue.
//!
//! External producers (touch handling, the referee, animation playback, the
//! boss) emit [`Input`] values. The [`InputQueue`] admits them based on the
//! active [`Phase`] and advances the phase as they are popped.
mod hook;
mod phase;
mod queue;

pub use hook::{NoopHook, PhaseHook};
pub use phase::Phase;
pub use queue::InputQueue;

use crate::board::{Board, Item, MonsterKind, TileCoord, TileType, Transformation};
use crate::boss::BossAttack;

/// What happened. Exactly one kind per input.
///
/// The field-less mirror [`InputTag`] names a kind without its payload and is
/// what transformation payloads use to record their cause.
#[derive(Clone, Debug, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(InputTag), derive(Hash, PartialOrd, Ord, strum::Display))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    strum_discriminants(derive(serde::Serialize, serde::Deserialize))
)]
pub enum InputKind {
    Touch { coord: TileCoord, tile: TileType },
    RotateLeft,
    RotateRight,
    Attack { attacker: TileCoord, defender: TileCoord },
    MonsterDies { coord: TileCoord, kind: MonsterKind },
    GameWin,
    GameLose,
    Play,
    Pause,
    AnimationsFinished,
    PlayAgain,
    Transformation(Vec<Transformation>),
    ReffingFinished { new_turn: bool },
    BoardBuilt,
    BoardLoaded,
    CollectItem { coord: TileCoord, item: Item },
    SelectLevel { level: u32 },
    NewTurn,
    BossTargetsWhatToEat(Vec<TileCoord>),
    BossEatsRocks(Vec<TileCoord>),
    BossTargetsWhatToAttack(Vec<BossAttack>),
    BossAttacks(Vec<BossAttack>),
}

impl InputKind {
    pub fn tag(&self) -> InputTag {
        InputTag::from(self)
    }

    /// Cause of the first transformation in a transformation payload.
    pub fn transformation_cause(&self) -> Option<InputTag> {
        match self {
            InputKind::Transformation(transformations) => {
                transformations.first().and_then(|t| t.cause)
            }
            _ => None,
        }
    }
}

impl InputTag {
    /// Inputs produced directly by the player's hands.
    pub fn is_player_move(self) -> bool {
        matches!(
            self,
            InputTag::Touch | InputTag::RotateLeft | InputTag::RotateRight
        )
    }

    /// Inputs emitted by the boss controller.
    pub fn is_boss(self) -> bool {
        matches!(
            self,
            InputTag::BossTargetsWhatToEat
                | InputTag::BossEatsRocks
                | InputTag::BossTargetsWhatToAttack
                | InputTag::BossAttacks
        )
    }
}

/// One externally observed occurrence plus the board it left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    pub kind: InputKind,
    pub resulting_board: Option<Board>,
}

impl Input {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            resulting_board: None,
        }
    }

    pub fn with_board(kind: InputKind, board: Board) -> Self {
        Self {
            kind,
            resulting_board: Some(board),
        }
    }

    pub fn tag(&self) -> InputTag {
        self.kind.tag()
    }
}

impl From<InputKind> for Input {
    fn from(kind: InputKind) -> Self {
        Self::new(kind)
    }
}
