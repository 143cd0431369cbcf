//! Session configuration and its environment loader.

use std::env;

use shaft_core::{BossConfig, Phase};

/// Settings for one [`crate::GameSession`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Tuning passed to the boss controller.
    pub boss: BossConfig,
    /// Whether the level hosts a boss encounter at all.
    pub boss_enabled: bool,
    /// Per-topic broadcast capacity of the event bus.
    pub event_buffer: usize,
    /// Phase the queue starts in and returns to on reset.
    pub initial_phase: Phase,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            boss: BossConfig::default(),
            boss_enabled: true,
            event_buffer: Self::DEFAULT_EVENT_BUFFER,
            initial_phase: Phase::Playing,
        }
    }
}

impl SessionConfig {
    pub const DEFAULT_EVENT_BUFFER: usize = 64;

    pub fn new(boss: BossConfig) -> Self {
        Self {
            boss,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_boss(mut self) -> Self {
        self.boss_enabled = false;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHAFT_BOSS_SEED` - Boss RNG seed
    /// - `SHAFT_BOSS_EAT_COUNT` - Rocks targeted per cycle (default: 3)
    /// - `SHAFT_EVENT_BUFFER` - Event bus capacity per topic (default: 64)
    /// - `SHAFT_BOSS_ENABLED` - Run the boss controller (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("SHAFT_BOSS_SEED") {
            config.boss.seed = seed;
        }
        if let Some(count) = read_env::<usize>("SHAFT_BOSS_EAT_COUNT") {
            config.boss.eat_count = count;
        }
        if let Some(capacity) = read_env::<usize>("SHAFT_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }
        if let Some(enabled) = read_env_bool("SHAFT_BOSS_ENABLED") {
            config.boss_enabled = enabled;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
