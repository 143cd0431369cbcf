/// Step of the boss cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BossAttackState {
    TargetsWhatToEat,
    Eats,
    TargetsWhatToAttack,
    Attacks,
    #[default]
    Rests,
    /// Stunned; the controller remembers the state to return to.
    Dizzied,
}

impl BossAttackState {
    /// Successor in the eat/attack/rest cycle.
    ///
    /// `Dizzied` has no successor of its own; the controller resolves it from
    /// the state saved before dizzying.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::TargetsWhatToEat => Some(Self::Eats),
            Self::Eats => Some(Self::TargetsWhatToAttack),
            Self::TargetsWhatToAttack => Some(Self::Attacks),
            Self::Attacks => Some(Self::Rests),
            Self::Rests => Some(Self::TargetsWhatToEat),
            Self::Dizzied => None,
        }
    }
}
