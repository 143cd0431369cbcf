//! Client-only settings read from the environment.

use std::env;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Player turns the demo plays before stopping.
    pub turns: u32,
    /// Log directory name; generated from the clock when unset.
    pub session_id: Option<String>,
    /// Seed for the demo board and the scripted player.
    pub demo_seed: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            turns: 12,
            session_id: None,
            demo_seed: 7,
        }
    }
}

impl ClientConfig {
    /// Environment variables:
    /// - `SHAFT_TURNS` - Player turns to play (default: 12)
    /// - `SHAFT_SESSION_ID` - Session name used for the log directory
    /// - `SHAFT_DEMO_SEED` - Demo board/player seed (default: 7)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(turns) = read_env::<u32>("SHAFT_TURNS") {
            config.turns = turns;
        }
        if let Ok(session_id) = env::var("SHAFT_SESSION_ID")
            && !session_id.is_empty()
        {
            config.session_id = Some(session_id);
        }
        if let Some(seed) = read_env::<u64>("SHAFT_DEMO_SEED") {
            config.demo_seed = seed;
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
