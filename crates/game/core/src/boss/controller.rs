use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::attack::{BossAttack, MonsterPool, select_attack_types};
use super::error::BossError;
use super::remap::{remap_after_removal, remap_after_rotation};
use super::state::BossAttackState;
use super::targeting::{AttackPlanner, choose_eat_targets};
use super::validate::validate_and_update_planned_attacks;
use crate::board::{Board, TileCoord, TileType, Transformation};
use crate::config::BossConfig;
use crate::input::{Input, InputKind, InputTag};

/// Per-cycle scratch state of the boss.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkingLists {
    /// Published eat targets (reticles).
    pub targets: Vec<TileCoord>,
    /// Tiles eaten this cycle, consumed when attacks are chosen.
    pub rocks_to_eat: Vec<TileType>,
    /// Published planned attacks.
    pub attacks: Vec<BossAttack>,
}

/// Change to something a view is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPublication {
    TargetsChanged(Vec<TileCoord>),
    AttacksChanged(Vec<BossAttack>),
}

/// Everything one boss step wants done, returned instead of performed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BossEffects {
    /// Inputs to append to the turn queue, in order.
    pub emitted: Vec<Input>,
    pub publications: Vec<BossPublication>,
}

impl BossEffects {
    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty() && self.publications.is_empty()
    }
}

/// Entry effect of `state`.
///
/// Pure apart from the RNG and monster pool: returns the new working lists and
/// the inputs to emit.
pub fn enter_state<R: Rng + ?Sized>(
    state: BossAttackState,
    lists: &WorkingLists,
    board: &Board,
    config: &BossConfig,
    pool: &mut MonsterPool,
    rng: &mut R,
) -> Result<(WorkingLists, Vec<InputKind>), BossError> {
    let mut next = lists.clone();
    let mut emitted = Vec::new();

    match state {
        BossAttackState::TargetsWhatToEat => {
            let targets = choose_eat_targets(board, config, config.eat_count, rng)
                .unwrap_or_else(|err| {
                    tracing::warn!(%err, "boss eats fewer rocks than planned");
                    err.into_partial()
                });
            next.targets = targets.clone();
            emitted.push(InputKind::BossTargetsWhatToEat(targets));
        }
        BossAttackState::Eats => {
            let (coords, rocks): (Vec<_>, Vec<_>) = lists
                .targets
                .iter()
                .filter_map(|&coord| {
                    board
                        .get(coord)
                        .filter(|tile| tile.rock_color().is_some())
                        .map(|tile| (coord, *tile))
                })
                .unzip();
            next.rocks_to_eat = rocks;
            next.targets.clear();
            emitted.push(InputKind::BossEatsRocks(coords));
        }
        BossAttackState::TargetsWhatToAttack => {
            let kinds = select_attack_types(&lists.rocks_to_eat, pool, rng);
            let mut planner = AttackPlanner::new(board, config)?;
            let attacks = planner.plan(&kinds, rng);
            next.attacks = attacks.clone();
            next.rocks_to_eat.clear();
            emitted.push(InputKind::BossTargetsWhatToAttack(attacks));
        }
        BossAttackState::Attacks => {
            let attacks = validate_and_update_planned_attacks(board, &lists.attacks);
            next.attacks.clear();
            emitted.push(InputKind::BossAttacks(attacks));
        }
        BossAttackState::Rests => next = WorkingLists::default(),
        BossAttackState::Dizzied => {}
    }

    Ok((next, emitted))
}

/// Drives the boss cycle from turn inputs.
///
/// One step per `NewTurn`. The controller never touches the input queue; the
/// caller appends [`BossEffects::emitted`] itself.
#[derive(Debug)]
pub struct BossController {
    config: BossConfig,
    rng: ChaCha8Rng,
    state: BossAttackState,
    state_before_dizzy: Option<BossAttackState>,
    board: Option<Board>,
    lists: WorkingLists,
    pool: MonsterPool,
}

impl BossController {
    pub fn new(config: BossConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            state: BossAttackState::default(),
            state_before_dizzy: None,
            board: None,
            lists: WorkingLists::default(),
            pool: MonsterPool::new(),
        }
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    pub fn state(&self) -> BossAttackState {
        self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn lists(&self) -> &WorkingLists {
        &self.lists
    }

    pub fn targets(&self) -> &[TileCoord] {
        &self.lists.targets
    }

    pub fn attacks(&self) -> &[BossAttack] {
        &self.lists.attacks
    }

    /// Reacts to one popped input.
    ///
    /// `NewTurn` stores its board (if any) and advances the cycle.
    /// Transformations caused by a touch or rotation move the published
    /// targets along with their tiles. Everything else is ignored.
    pub fn handle(&mut self, input: &Input) -> Result<BossEffects, BossError> {
        match &input.kind {
            InputKind::NewTurn => {
                if let Some(board) = &input.resulting_board {
                    self.board = Some(board.clone());
                }
                self.advance_state()
            }
            InputKind::Transformation(transformations) => Ok(self.follow(transformations)),
            _ => Ok(BossEffects::default()),
        }
    }

    /// Steps to the next state and runs its entry effect.
    ///
    /// Leaving `Dizzied` restores the saved state without re-running its
    /// entry. On error the state does not change.
    pub fn advance_state(&mut self) -> Result<BossEffects, BossError> {
        let Some(next) = self.state.next() else {
            let restored = self.state_before_dizzy.take().unwrap_or_default();
            tracing::info!(state = %restored, "boss recovers");
            self.state = restored;
            return Ok(BossEffects::default());
        };

        let board = self.board.as_ref().ok_or(BossError::NoBoard)?;
        let (lists, kinds) = enter_state(
            next,
            &self.lists,
            board,
            &self.config,
            &mut self.pool,
            &mut self.rng,
        )?;

        let publications = self.publish(lists);
        tracing::debug!(from = %self.state, to = %next, emitted = kinds.len(), "boss state advanced");
        self.state = next;

        Ok(BossEffects {
            emitted: kinds.into_iter().map(Input::new).collect(),
            publications,
        })
    }

    /// Stuns the boss. The next advance returns it to where it was.
    pub fn dizzy(&mut self) {
        if self.state == BossAttackState::Dizzied {
            return;
        }
        tracing::info!(state = %self.state, "boss dizzied");
        self.state_before_dizzy = Some(self.state);
        self.state = BossAttackState::Dizzied;
    }

    /// Back to a freshly constructed controller, RNG included.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    fn follow(&mut self, transformations: &[Transformation]) -> BossEffects {
        if self.lists.targets.is_empty() {
            return BossEffects::default();
        }

        let mut targets = self.lists.targets.clone();
        for transformation in transformations {
            targets = match transformation.cause {
                Some(InputTag::Touch) => remap_after_removal(&targets, &transformation.removed),
                Some(InputTag::RotateLeft | InputTag::RotateRight) => {
                    remap_after_rotation(&targets, &transformation.tile_transformations)
                }
                _ => targets,
            };
        }

        let lists = WorkingLists {
            targets,
            ..self.lists.clone()
        };
        BossEffects {
            emitted: Vec::new(),
            publications: self.publish(lists),
        }
    }

    fn publish(&mut self, lists: WorkingLists) -> Vec<BossPublication> {
        let mut publications = Vec::new();
        if lists.targets != self.lists.targets {
            publications.push(BossPublication::TargetsChanged(lists.targets.clone()));
        }
        if lists.attacks != self.lists.attacks {
            publications.push(BossPublication::AttacksChanged(lists.attacks.clone()));
        }
        self.lists = lists;
        publications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, TileTransformation};
    use crate::error::BoardError;
    use crate::test_support::rock_board;

    fn new_turn(board: &Board) -> Input {
        Input::with_board(InputKind::NewTurn, board.clone())
    }

    fn emitted_tags(effects: &BossEffects) -> Vec<InputTag> {
        effects.emitted.iter().map(Input::tag).collect()
    }

    #[test]
    fn advancing_without_board_fails() {
        let mut boss = BossController::new(BossConfig::default());
        assert_eq!(boss.advance_state(), Err(BossError::NoBoard));
        assert_eq!(boss.state(), BossAttackState::Rests);
    }

    #[test]
    fn full_cycle_emits_in_order_and_returns_to_rest() {
        let board = rock_board(6, 6, TileCoord::new(2, 2), &[]);
        let mut boss = BossController::new(BossConfig::default());

        let mut tags = Vec::new();
        let mut visited = Vec::new();
        for _ in 0..5 {
            let effects = boss.handle(&new_turn(&board)).unwrap();
            tags.extend(emitted_tags(&effects));
            visited.push(boss.state());
        }

        assert_eq!(
            tags,
            vec![
                InputTag::BossTargetsWhatToEat,
                InputTag::BossEatsRocks,
                InputTag::BossTargetsWhatToAttack,
                InputTag::BossAttacks,
            ]
        );
        assert_eq!(
            visited,
            vec![
                BossAttackState::TargetsWhatToEat,
                BossAttackState::Eats,
                BossAttackState::TargetsWhatToAttack,
                BossAttackState::Attacks,
                BossAttackState::Rests,
            ]
        );
        assert_eq!(boss.lists(), &WorkingLists::default());
    }

    #[test]
    fn eaten_red_rocks_become_bombs() {
        let board = rock_board(6, 6, TileCoord::new(2, 2), &[]);
        let mut boss = BossController::new(BossConfig::default());

        let eat = boss.handle(&new_turn(&board)).unwrap();
        let InputKind::BossTargetsWhatToEat(targets) = &eat.emitted[0].kind else {
            panic!("expected eat targets");
        };
        assert_eq!(targets.len(), 3);
        assert_eq!(
            eat.publications,
            vec![BossPublication::TargetsChanged(targets.clone())]
        );

        let eats = boss.handle(&new_turn(&board)).unwrap();
        assert_eq!(eats.emitted[0].kind, InputKind::BossEatsRocks(targets.clone()));
        assert!(boss.targets().is_empty());
        assert_eq!(boss.lists().rocks_to_eat.len(), 3);

        let plan = boss.handle(&new_turn(&board)).unwrap();
        let InputKind::BossTargetsWhatToAttack(attacks) = &plan.emitted[0].kind else {
            panic!("expected planned attacks");
        };
        assert_eq!(attacks.len(), 3);
        assert!(attacks.iter().all(|a| matches!(a, BossAttack::Bomb(_))));
        assert!(boss.lists().rocks_to_eat.is_empty());

        let fire = boss.handle(&new_turn(&board)).unwrap();
        assert_eq!(fire.emitted[0].kind, InputKind::BossAttacks(attacks.clone()));
        assert!(boss.attacks().is_empty());
    }

    #[test]
    fn dizzy_returns_to_saved_state_without_reentry() {
        let board = rock_board(5, 5, TileCoord::new(0, 0), &[]);
        let mut boss = BossController::new(BossConfig::default());
        boss.handle(&new_turn(&board)).unwrap();
        let targets = boss.targets().to_vec();

        boss.dizzy();
        boss.dizzy();
        assert_eq!(boss.state(), BossAttackState::Dizzied);

        let recovered = boss.handle(&new_turn(&board)).unwrap();
        assert!(recovered.is_empty());
        assert_eq!(boss.state(), BossAttackState::TargetsWhatToEat);
        assert_eq!(boss.targets(), targets.as_slice());

        boss.handle(&new_turn(&board)).unwrap();
        assert_eq!(boss.state(), BossAttackState::Eats);
    }

    #[test]
    fn touch_removal_lowers_targets() {
        let mut board = Board::filled(5, 5, TileType::Empty).unwrap();
        board.set(TileCoord::new(4, 4), TileType::player(5)).unwrap();
        board
            .set(TileCoord::new(3, 2), TileType::rock(Color::Blue))
            .unwrap();
        let config = BossConfig::default().with_eat_count(1);
        let mut boss = BossController::new(config);
        boss.handle(&new_turn(&board)).unwrap();
        assert_eq!(boss.targets(), &[TileCoord::new(3, 2)]);

        let transformation = Transformation::caused_by(InputTag::Touch)
            .with_removed(vec![TileCoord::new(0, 2)]);
        let effects = boss
            .handle(&Input::new(InputKind::Transformation(vec![transformation])))
            .unwrap();

        assert_eq!(boss.targets(), &[TileCoord::new(2, 2)]);
        assert_eq!(
            effects.publications,
            vec![BossPublication::TargetsChanged(vec![TileCoord::new(2, 2)])]
        );
    }

    #[test]
    fn rotation_moves_targets_with_their_tiles() {
        let mut board = Board::filled(5, 5, TileType::Empty).unwrap();
        board.set(TileCoord::new(4, 4), TileType::player(5)).unwrap();
        board
            .set(TileCoord::new(1, 3), TileType::rock(Color::Purple))
            .unwrap();
        let config = BossConfig::default().with_eat_count(1);
        let mut boss = BossController::new(config);
        boss.handle(&new_turn(&board)).unwrap();
        assert_eq!(boss.targets(), &[TileCoord::new(1, 3)]);

        let transformation = Transformation::caused_by(InputTag::RotateLeft)
            .with_tile_transformations(vec![
                TileTransformation::new(TileCoord::new(1, 3), TileCoord::new(3, 3)),
                TileTransformation::new(TileCoord::new(3, 3), TileCoord::new(3, 1)),
            ]);
        let effects = boss
            .handle(&Input::new(InputKind::Transformation(vec![transformation])))
            .unwrap();

        assert_eq!(boss.targets(), &[TileCoord::new(3, 3)]);
        assert!(effects.emitted.is_empty());
        assert_eq!(
            effects.publications,
            vec![BossPublication::TargetsChanged(vec![TileCoord::new(3, 3)])]
        );
    }

    #[test]
    fn unrelated_transformation_leaves_targets() {
        let board = rock_board(5, 5, TileCoord::new(0, 0), &[]);
        let mut boss = BossController::new(BossConfig::default());
        boss.handle(&new_turn(&board)).unwrap();
        let before = boss.targets().to_vec();

        let transformation = Transformation::caused_by(InputTag::Attack)
            .with_removed(vec![TileCoord::new(0, 1)]);
        let effects = boss
            .handle(&Input::new(InputKind::Transformation(vec![transformation])))
            .unwrap();

        assert!(effects.is_empty());
        assert_eq!(boss.targets(), before.as_slice());
    }

    #[test]
    fn missing_player_surfaces_when_planning_attacks() {
        let board = Board::filled(4, 4, TileType::rock(Color::Red)).unwrap();
        let mut boss = BossController::new(BossConfig::default());
        boss.handle(&new_turn(&board)).unwrap();
        boss.handle(&new_turn(&board)).unwrap();

        assert_eq!(
            boss.handle(&new_turn(&board)),
            Err(BossError::Board(BoardError::MissingPlayer))
        );
        assert_eq!(boss.state(), BossAttackState::Eats);
    }

    #[test]
    fn same_seed_same_encounter() {
        let board = rock_board(7, 7, TileCoord::new(3, 3), &[TileCoord::new(1, 1)]);
        let run = || {
            let mut boss = BossController::new(BossConfig::default().with_seed(42));
            (0..5)
                .map(|_| boss.handle(&new_turn(&board)).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn reset_forgets_everything() {
        let board = rock_board(5, 5, TileCoord::new(0, 0), &[]);
        let mut boss = BossController::new(BossConfig::default());
        boss.handle(&new_turn(&board)).unwrap();
        boss.reset();

        assert_eq!(boss.state(), BossAttackState::Rests);
        assert!(boss.board().is_none());
        assert!(boss.targets().is_empty());
    }
}
