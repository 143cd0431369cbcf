use std::collections::VecDeque;

use super::{Input, NoopHook, Phase, PhaseHook};

/// Strict FIFO of pending inputs plus the active [`Phase`].
///
/// The active phase gates admission at `append` time; transition validity is
/// evaluated against the phase active at `pop` time. Owned by the session
/// controller, never shared process-wide.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    queue: VecDeque<Input>,
    phase: Phase,
}

impl InputQueue {
    /// Creates an empty queue in [`Phase::Playing`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue starting in `phase`.
    pub fn with_phase(phase: Phase) -> Self {
        Self {
            queue: VecDeque::new(),
            phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending inputs, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Input> + '_ {
        self.queue.iter()
    }

    /// Queues `input` if the active phase admits it.
    ///
    /// Returns whether the input was admitted. Rejection is backpressure, not
    /// an error: the input is simply dropped.
    pub fn append(&mut self, input: Input) -> bool {
        if self.phase.admits(&input.kind) {
            tracing::debug!(phase = %self.phase, input = %input.tag(), "input admitted");
            self.queue.push_back(input);
            true
        } else {
            tracing::debug!(phase = %self.phase, input = %input.tag(), "input dropped");
            false
        }
    }

    /// Read-only access to the front of the queue.
    pub fn peek(&self) -> Option<&Input> {
        self.queue.front()
    }

    /// Pops the front input without any phase entry side effects.
    pub fn pop(&mut self) -> Option<Input> {
        self.pop_with(&mut NoopHook)
    }

    /// Pops the front input and advances the phase.
    ///
    /// If the active phase transitions on the front input, the input is
    /// returned and, when the phase actually changes, the new phase's entry
    /// hook runs. Otherwise the input is drained and `None` is returned.
    pub fn pop_with<H: PhaseHook + ?Sized>(&mut self, hook: &mut H) -> Option<Input> {
        let front = self.queue.pop_front()?;

        let Some(next) = self.phase.transition(&front) else {
            tracing::debug!(phase = %self.phase, input = %front.tag(), "input drained");
            return None;
        };

        let previous = std::mem::replace(&mut self.phase, next);
        if previous != next {
            tracing::debug!(from = %previous, to = %next, input = %front.tag(), "phase transition");
            next.enter(&front, hook);
        }

        Some(front)
    }

    /// Clears pending inputs and forces the active phase.
    pub fn reset(&mut self, phase: Phase) {
        tracing::debug!(phase = %phase, dropped = self.queue.len(), "input queue reset");
        self.queue.clear();
        self.phase = phase;
    }
}
