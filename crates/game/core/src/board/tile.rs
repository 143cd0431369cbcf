/// Rock, pillar and gem colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
    Purple,
    Brown,
    Green,
}

/// Monster species that can occupy a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MonsterKind {
    Rat,
    Bat,
    Sally,
    Alamo,
    Dragon,
    Wizard,
}

impl MonsterKind {
    /// Species the boss is able to summon onto the board.
    pub const SPAWNABLE: [MonsterKind; 4] = [
        MonsterKind::Rat,
        MonsterKind::Bat,
        MonsterKind::Sally,
        MonsterKind::Alamo,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterData {
    pub kind: MonsterKind,
    pub hp: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerData {
    pub hp: u32,
    pub max_hp: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Gem,
    Rune,
    Heart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    pub amount: u32,
}

/// What occupies a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileType {
    #[default]
    Empty,
    Rock {
        color: Color,
        holds_gem: bool,
        group_count: u32,
    },
    Monster(MonsterData),
    Player(PlayerData),
    Pillar {
        color: Color,
        health: u32,
    },
    Exit {
        blocked: bool,
    },
    Item(Item),
    Offer {
        id: u32,
    },
    Dynamite {
        fuse: u32,
    },
    Gem {
        color: Color,
        amount: u32,
    },
}

impl TileType {
    /// Plain rock without a gem, in a group of one.
    pub const fn rock(color: Color) -> Self {
        Self::Rock {
            color,
            holds_gem: false,
            group_count: 1,
        }
    }

    pub const fn player(hp: u32) -> Self {
        Self::Player(PlayerData { hp, max_hp: hp })
    }

    pub const fn pillar(color: Color, health: u32) -> Self {
        Self::Pillar { color, health }
    }

    pub const fn monster(kind: MonsterKind, hp: u32) -> Self {
        Self::Monster(MonsterData { kind, hp })
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player(_))
    }

    pub fn is_pillar(&self) -> bool {
        matches!(self, Self::Pillar { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Color of a rock tile, `None` for everything else.
    pub fn rock_color(&self) -> Option<Color> {
        match self {
            Self::Rock { color, .. } => Some(*color),
            _ => None,
        }
    }

    /// True for rocks that do not hide a gem.
    pub fn is_plain_rock(&self) -> bool {
        matches!(
            self,
            Self::Rock {
                holds_gem: false,
                ..
            }
        )
    }
}
