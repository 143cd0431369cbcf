use super::{Input, Phase};

/// Side-effect adapter invoked when the queue enters a new phase.
///
/// The referee is wired in through this trait: entering [`Phase::Reffing`]
/// hands it the snapshotted board. Inputs the adapter produces in response
/// must be fed back through the queue's normal `append` path by its owner.
pub trait PhaseHook {
    fn on_enter(&mut self, phase: Phase, trigger: &Input);
}

/// Hook that ignores every phase entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHook;

impl PhaseHook for NoopHook {
    fn on_enter(&mut self, _phase: Phase, _trigger: &Input) {}
}

impl<F> PhaseHook for F
where
    F: FnMut(Phase, &Input),
{
    fn on_enter(&mut self, phase: Phase, trigger: &Input) {
        self(phase, trigger)
    }
}
