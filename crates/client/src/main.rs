//! Shaft headless client binary.
//!
//! Composition root that assembles a [`GameSession`](shaft_runtime::GameSession)
//! around a demo board, a scripted referee and a scripted player, then plays a
//! boss encounter for a fixed number of turns. Boss events are written to the
//! log as JSON by a task subscribed to the session's event bus.
//!
//! # Examples
//!
//! ```bash
//! SHAFT_TURNS=20 SHAFT_BOSS_SEED=42 RUST_LOG=debug cargo run -p shaft-client
//! ```

mod config;
mod demo;
mod logging;

use anyhow::Result;
use shaft_runtime::{Event, SessionConfig, Topic};
use tokio::sync::broadcast::error::RecvError;

use crate::config::ClientConfig;
use crate::demo::Demo;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env();
    let session_config = SessionConfig::from_env();
    let log_file = logging::setup_logging(client_config.session_id.as_deref())?;

    tracing::info!(
        turns = client_config.turns,
        boss = session_config.boss_enabled,
        seed = session_config.boss.seed,
        "starting headless session"
    );

    let mut demo = Demo::new(session_config, client_config.demo_seed)?;
    let reporter = tokio::spawn(report_boss_events(demo.session().subscribe(Topic::Boss)));

    for turn in 1..=client_config.turns {
        demo.play_turn()?;

        let session = demo.session();
        tracing::info!(
            turn,
            phase = %session.phase(),
            boss = ?session.boss().map(|boss| boss.state()),
            "turn settled"
        );
        if session.phase().is_terminal() {
            break;
        }
    }

    let final_phase = demo.session().phase();
    drop(demo);
    let reported = reporter.await?;

    println!(
        "finished in {final_phase} after {reported} boss events; log: {}",
        log_file.display()
    );
    Ok(())
}

/// Logs boss events until the session is dropped. Returns how many were seen.
async fn report_boss_events(mut rx: tokio::sync::broadcast::Receiver<Event>) -> usize {
    let mut seen = 0;
    loop {
        match rx.recv().await {
            Ok(event) => {
                seen += 1;
                match serde_json::to_string(&event) {
                    Ok(json) => tracing::info!(target: "shaft::boss", "{json}"),
                    Err(err) => tracing::warn!(%err, "failed to encode boss event"),
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "boss event reporter lagged");
            }
            Err(RecvError::Closed) => return seen,
        }
    }
}
