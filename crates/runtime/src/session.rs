//! Session controller owning one input queue and its boss.

use shaft_core::{
    Board, BossController, BossEffects, BossPublication, Input, InputKind, InputQueue, InputTag,
    Phase,
};
use tokio::sync::broadcast;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::{BossEvent, Event, EventBus, Topic, TurnEvent};
use crate::hooks::{Referee, RefereeHook};

/// What a single [`GameSession::step`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The queue was empty.
    Idle,
    /// The front input had no transition and was discarded.
    Drained(InputTag),
    /// The front input was consumed.
    Advanced(Input),
}

/// One game session: the turn queue, the boss, and the referee adapter.
///
/// All calls are synchronous. Inputs produced internally (referee rulings,
/// boss emissions) go through the same admission path as external ones.
pub struct GameSession<R> {
    config: SessionConfig,
    queue: InputQueue,
    boss: Option<BossController>,
    hook: RefereeHook<R>,
    bus: EventBus,
    last_board: Option<Board>,
}

impl<R: Referee> GameSession<R> {
    pub fn new(config: SessionConfig, referee: R) -> Self {
        let boss = config
            .boss_enabled
            .then(|| BossController::new(config.boss.clone()));

        Self {
            queue: InputQueue::with_phase(config.initial_phase),
            boss,
            hook: RefereeHook::new(referee),
            bus: EventBus::with_capacity(config.event_buffer),
            last_board: None,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.queue.phase()
    }

    pub fn queue(&self) -> &InputQueue {
        &self.queue
    }

    pub fn boss(&self) -> Option<&BossController> {
        self.boss.as_ref()
    }

    pub fn boss_mut(&mut self) -> Option<&mut BossController> {
        self.boss.as_mut()
    }

    pub fn referee(&self) -> &R {
        self.hook.referee()
    }

    pub fn referee_mut(&mut self) -> &mut R {
        self.hook.referee_mut()
    }

    /// Most recent board snapshot seen on a consumed input.
    pub fn last_board(&self) -> Option<&Board> {
        self.last_board.as_ref()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Offers an input to the queue. Returns whether it was admitted.
    ///
    /// `NewTurn` never enters the queue; it goes straight to the boss.
    pub fn send(&mut self, input: Input) -> Result<bool> {
        if input.tag() == InputTag::NewTurn {
            if let Some(board) = &input.resulting_board {
                self.last_board = Some(board.clone());
            }
            self.new_turn()?;
            return Ok(false);
        }

        let tag = input.tag();
        let phase = self.queue.phase();
        let admitted = self.queue.append(input);
        if admitted {
            self.bus.publish(TurnEvent::Admitted { input: tag, phase });
        } else {
            self.bus.publish(TurnEvent::Dropped { input: tag, phase });
        }
        Ok(admitted)
    }

    /// Pops one input and reacts to it.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let Some(tag) = self.queue.peek().map(Input::tag) else {
            return Ok(StepOutcome::Idle);
        };

        let from = self.queue.phase();
        let Some(input) = self.queue.pop_with(&mut self.hook) else {
            self.bus.publish(TurnEvent::Drained { input: tag, phase: from });
            return Ok(StepOutcome::Drained(tag));
        };
        self.bus.publish(TurnEvent::Popped {
            input: tag,
            from,
            to: self.queue.phase(),
        });

        if let Some(board) = &input.resulting_board {
            self.last_board = Some(board.clone());
        }

        if let Some(boss) = self.boss.as_mut() {
            let effects = boss.handle(&input)?;
            self.apply(effects)?;
        }

        for ruling in self.hook.take_pending() {
            self.send(ruling)?;
        }

        if matches!(input.kind, InputKind::ReffingFinished { new_turn: true }) {
            self.new_turn()?;
        }

        Ok(StepOutcome::Advanced(input))
    }

    /// Steps until the queue is empty and returns every consumed input.
    pub fn run_until_idle(&mut self) -> Result<Vec<Input>> {
        let mut consumed = Vec::new();
        loop {
            match self.step()? {
                StepOutcome::Idle => return Ok(consumed),
                StepOutcome::Drained(_) => {}
                StepOutcome::Advanced(input) => consumed.push(input),
            }
        }
    }

    /// Drops pending inputs and returns the queue and boss to their start.
    pub fn reset(&mut self) {
        self.queue.reset(self.config.initial_phase);
        if let Some(boss) = self.boss.as_mut() {
            boss.reset();
        }
        self.hook.clear();
        self.last_board = None;
        tracing::info!("session reset");
    }

    fn new_turn(&mut self) -> Result<()> {
        let Some(boss) = self.boss.as_mut() else {
            return Ok(());
        };

        let input = match &self.last_board {
            Some(board) => Input::with_board(InputKind::NewTurn, board.clone()),
            None => Input::new(InputKind::NewTurn),
        };

        let from = boss.state();
        let effects = boss.handle(&input)?;
        let to = boss.state();
        if from != to {
            self.bus.publish(BossEvent::StateChanged { from, to });
        }

        self.apply(effects)
    }

    fn apply(&mut self, effects: BossEffects) -> Result<()> {
        for publication in effects.publications {
            let event = match publication {
                BossPublication::TargetsChanged(targets) => BossEvent::TargetsChanged(targets),
                BossPublication::AttacksChanged(attacks) => BossEvent::AttacksChanged(attacks),
            };
            self.bus.publish(event);
        }

        for input in effects.emitted {
            self.send(input)?;
        }
        Ok(())
    }
}
