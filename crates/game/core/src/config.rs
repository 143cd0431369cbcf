use crate::board::Color;

/// Board-wide constants shared by builders and validators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    // ===== compile-time constants =====
    /// Largest board edge a snapshot may have. Checked by every `Board`
    /// constructor.
    pub const MAX_BOARD_EDGE: usize = 16;
}

/// Tunable parameters for the boss encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossConfig {
    /// Seed for the boss RNG. Same seed + same input stream = same encounter.
    pub seed: u64,

    /// Number of rocks the boss targets each cycle.
    pub eat_count: usize,

    /// Rock colors the boss refuses to eat.
    pub inedible_colors: Vec<Color>,

    /// Random probes before a point search falls back to scanning the board.
    pub max_point_attempts: u32,

    /// Random line draws allowed per poison beam.
    pub max_poison_attempts: u32,

    /// Maximum number of poison beams allowed to cross the player's tile.
    pub max_player_beams: usize,

    /// Initial Chebyshev radius around the player for monster spawns.
    pub spawn_radius: usize,
}

impl BossConfig {
    pub const DEFAULT_SEED: u64 = 0x5AF7_B055;
    pub const DEFAULT_EAT_COUNT: usize = 3;
    pub const DEFAULT_MAX_POINT_ATTEMPTS: u32 = 64;
    pub const DEFAULT_MAX_POISON_ATTEMPTS: u32 = 100;
    pub const DEFAULT_MAX_PLAYER_BEAMS: usize = 2;
    pub const DEFAULT_SPAWN_RADIUS: usize = 2;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            eat_count: Self::DEFAULT_EAT_COUNT,
            inedible_colors: vec![Color::Brown, Color::Green],
            max_point_attempts: Self::DEFAULT_MAX_POINT_ATTEMPTS,
            max_poison_attempts: Self::DEFAULT_MAX_POISON_ATTEMPTS,
            max_player_beams: Self::DEFAULT_MAX_PLAYER_BEAMS,
            spawn_radius: Self::DEFAULT_SPAWN_RADIUS,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_eat_count(mut self, eat_count: usize) -> Self {
        self.eat_count = eat_count;
        self
    }

    /// Returns true if the boss is allowed to eat rocks of this color.
    pub fn is_edible(&self, color: Color) -> bool {
        !self.inedible_colors.contains(&color)
    }
}

impl Default for BossConfig {
    fn default() -> Self {
        Self::new()
    }
}
