use super::{Input, InputKind, InputTag, PhaseHook};

/// Top-level turn phase. Exactly one is active at a time.
///
/// Admission and transition are pure `match` tables so they can be inspected
/// and tested as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Playing,
    Paused,
    Computing,
    Animating,
    Reffing,
    GameWin,
    GameLose,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Playing,
        Phase::Paused,
        Phase::Computing,
        Phase::Animating,
        Phase::Reffing,
        Phase::GameWin,
        Phase::GameLose,
    ];

    /// Whether this phase accepts `kind` into the queue.
    pub fn admits(self, kind: &InputKind) -> bool {
        use InputTag as T;

        let tag = kind.tag();
        match self {
            Phase::Playing => matches!(
                tag,
                T::GameWin
                    | T::GameLose
                    | T::Pause
                    | T::Attack
                    | T::Transformation
                    | T::Touch
                    | T::MonsterDies
                    | T::RotateLeft
                    | T::RotateRight
                    | T::BoardBuilt
                    | T::BoardLoaded
                    | T::BossTargetsWhatToEat
                    | T::BossEatsRocks
                    | T::BossTargetsWhatToAttack
                    | T::BossAttacks
            ),
            Phase::Paused => matches!(tag, T::Play | T::SelectLevel),
            Phase::Computing => tag == T::Transformation,
            Phase::Animating => tag == T::AnimationsFinished,
            Phase::Reffing => matches!(
                tag,
                T::ReffingFinished
                    | T::Attack
                    | T::MonsterDies
                    | T::GameWin
                    | T::GameLose
                    | T::CollectItem
            ),
            Phase::GameWin => match tag {
                T::PlayAgain | T::SelectLevel => true,
                T::Transformation => kind.transformation_cause() == Some(T::GameWin),
                _ => false,
            },
            Phase::GameLose => matches!(tag, T::PlayAgain | T::SelectLevel),
        }
    }

    /// Phase to switch to when `input` is popped while this phase is active.
    ///
    /// `None` means the input is drained without a phase change.
    pub fn transition(self, input: &Input) -> Option<Phase> {
        use InputTag as T;

        let tag = input.tag();
        match self {
            Phase::Playing => match tag {
                T::GameWin => Some(Phase::GameWin),
                T::GameLose => Some(Phase::GameLose),
                T::Pause => Some(Phase::Paused),
                T::Attack
                | T::Touch
                | T::MonsterDies
                | T::RotateLeft
                | T::RotateRight
                | T::CollectItem => Some(Phase::Computing),
                T::BoardBuilt | T::BoardLoaded => Some(Phase::Playing),
                // Reticles only; the board does not change.
                T::BossTargetsWhatToEat | T::BossTargetsWhatToAttack => Some(Phase::Playing),
                // The board builder must apply these before play resumes.
                T::BossEatsRocks | T::BossAttacks => Some(Phase::Computing),
                _ => None,
            },
            Phase::Paused => match tag {
                T::Play | T::SelectLevel => Some(Phase::Playing),
                _ => None,
            },
            Phase::Computing => match tag {
                T::Transformation => Some(Phase::Animating),
                _ => None,
            },
            Phase::Animating => match tag {
                T::AnimationsFinished => Some(Phase::Reffing),
                _ => None,
            },
            Phase::Reffing => match tag {
                T::ReffingFinished => Some(Phase::Playing),
                T::Attack | T::MonsterDies | T::CollectItem => Some(Phase::Computing),
                T::GameWin => Some(Phase::GameWin),
                T::GameLose => Some(Phase::GameLose),
                _ => None,
            },
            Phase::GameWin => match tag {
                T::PlayAgain | T::SelectLevel => Some(Phase::Playing),
                T::Transformation if input.kind.transformation_cause() == Some(T::GameWin) => {
                    Some(Phase::GameWin)
                }
                _ => None,
            },
            Phase::GameLose => match tag {
                T::PlayAgain | T::SelectLevel => Some(Phase::Playing),
                _ => None,
            },
        }
    }

    /// Runs the entry side effect for this phase.
    ///
    /// Only Reffing has one: the hook is expected to invoke the referee on the
    /// trigger's board snapshot. Every entered phase is still reported to the
    /// hook so adapters can track context.
    pub fn enter<H: PhaseHook + ?Sized>(self, trigger: &Input, hook: &mut H) {
        tracing::debug!(phase = %self, trigger = %trigger.tag(), "entering phase");
        hook.on_enter(self, trigger);
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameWin | Phase::GameLose)
    }
}
