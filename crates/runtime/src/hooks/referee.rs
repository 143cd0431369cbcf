use shaft_core::{Board, Input, InputTag, Phase, PhaseHook};

/// Game rules evaluated once animations settle.
///
/// Called synchronously on entry to [`Phase::Reffing`] and expected to be
/// fast. Returns the inputs that describe its ruling, typically one
/// `ReffingFinished` or a win/lose/attack/collect outcome.
pub trait Referee {
    /// `cause` is the input kind behind the transformation that was just
    /// animated, if any.
    fn apply_rules(&mut self, board: Option<&Board>, cause: Option<InputTag>) -> Vec<Input>;
}

impl<F> Referee for F
where
    F: FnMut(Option<&Board>, Option<InputTag>) -> Vec<Input>,
{
    fn apply_rules(&mut self, board: Option<&Board>, cause: Option<InputTag>) -> Vec<Input> {
        self(board, cause)
    }
}

/// [`PhaseHook`] that runs a [`Referee`] on entry to Reffing.
///
/// Remembers the cause of the transformation that moved the queue into
/// Animating so the referee can tell player moves from everything else.
#[derive(Debug)]
pub struct RefereeHook<R> {
    referee: R,
    cause: Option<InputTag>,
    pending: Vec<Input>,
}

impl<R: Referee> RefereeHook<R> {
    pub fn new(referee: R) -> Self {
        Self {
            referee,
            cause: None,
            pending: Vec::new(),
        }
    }

    pub fn referee(&self) -> &R {
        &self.referee
    }

    pub fn referee_mut(&mut self) -> &mut R {
        &mut self.referee
    }

    /// Inputs produced since the last call, in production order.
    pub fn take_pending(&mut self) -> Vec<Input> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.cause = None;
        self.pending.clear();
    }
}

impl<R: Referee> PhaseHook for RefereeHook<R> {
    fn on_enter(&mut self, phase: Phase, trigger: &Input) {
        match phase {
            Phase::Animating => self.cause = trigger.kind.transformation_cause(),
            Phase::Reffing => {
                let ruling = self
                    .referee
                    .apply_rules(trigger.resulting_board.as_ref(), self.cause.take());
                tracing::debug!(produced = ruling.len(), "referee ruled");
                self.pending.extend(ruling);
            }
            _ => {}
        }
    }
}
