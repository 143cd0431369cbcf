//! Session orchestration for the shaft turn sequencer.
//!
//! This crate wires the pure pieces of `shaft-core` into a usable session:
//! one [`InputQueue`](shaft_core::InputQueue), an optional boss, a referee
//! adapter installed as the queue's phase hook, and a topic-based event bus
//! that views subscribe to.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the controller that owns the queue and the boss
//! - [`hooks`] adapts external collaborators to phase-entry hooks
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`config`] loads session settings from the environment
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod session;

pub use config::SessionConfig;
pub use error::{Result, RuntimeError};
pub use events::{BossEvent, Event, EventBus, Topic, TurnEvent};
pub use hooks::{Referee, RefereeHook};
pub use session::{GameSession, StepOutcome};
