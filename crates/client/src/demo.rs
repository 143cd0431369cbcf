//! Headless stand-ins for the board builder, the referee and the player.
//!
//! Enough rules to push a session through real boss cycles: touched and eaten
//! rocks disappear, everything above falls, and the top of each column is
//! refilled with random rocks.

use anyhow::{Result, anyhow};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use shaft_core::{
    Board, BossAttack, Color, Input, InputKind, InputTag, Phase, TileCoord, TileTransformation,
    TileType, Transformation,
};
use shaft_runtime::{GameSession, Referee, SessionConfig};

const ROWS: usize = 7;
const COLUMNS: usize = 6;
const ROCK_COLORS: [Color; 5] = [
    Color::Red,
    Color::Blue,
    Color::Purple,
    Color::Brown,
    Color::Green,
];

/// Grants a new turn after player moves and calls the game lost once the
/// player tile is gone.
#[derive(Debug, Default)]
pub struct ScriptedReferee {
    pub rulings: u32,
}

impl Referee for ScriptedReferee {
    fn apply_rules(&mut self, board: Option<&Board>, cause: Option<InputTag>) -> Vec<Input> {
        self.rulings += 1;
        if board.is_some_and(|board| board.player_coord().is_err()) {
            return vec![Input::new(InputKind::GameLose)];
        }
        let new_turn = cause.is_some_and(InputTag::is_player_move);
        vec![Input::new(InputKind::ReffingFinished { new_turn })]
    }
}

/// Drives one session: picks player touches and answers every Computing
/// phase with a transformation plus finished animations.
pub struct Demo {
    session: GameSession<ScriptedReferee>,
    board: Board,
    rng: ChaCha8Rng,
}

impl Demo {
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = demo_board(&mut rng)?;
        let mut session = GameSession::new(config, ScriptedReferee::default());
        session.send(Input::with_board(InputKind::BoardBuilt, board.clone()))?;
        session.run_until_idle()?;

        Ok(Self {
            session,
            board,
            rng,
        })
    }

    pub fn session(&self) -> &GameSession<ScriptedReferee> {
        &self.session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Touches a random rock and settles the session back to rest.
    pub fn play_turn(&mut self) -> Result<()> {
        let rocks: Vec<TileCoord> = self
            .board
            .iter()
            .filter(|(_, tile)| tile.is_plain_rock())
            .map(|(coord, _)| coord)
            .collect();
        let coord = *rocks
            .choose(&mut self.rng)
            .ok_or_else(|| anyhow!("no rock left to touch"))?;
        let tile = self.board.get(coord).cloned().unwrap_or_default();

        tracing::info!(%coord, "player touches");
        self.session.send(Input::new(InputKind::Touch { coord, tile }))?;
        self.settle()
    }

    /// Runs the session until it waits on the player or the game ends.
    fn settle(&mut self) -> Result<()> {
        loop {
            let consumed = self.session.run_until_idle()?;
            if self.session.phase() != Phase::Computing {
                return Ok(());
            }

            let trigger = consumed
                .last()
                .ok_or_else(|| anyhow!("entered Computing without a trigger"))?;
            let (transformation, board) = transform(&self.board, trigger, &mut self.rng)?;
            self.board = board;

            self.session.send(Input::with_board(
                InputKind::Transformation(vec![transformation]),
                self.board.clone(),
            ))?;
            self.session.run_until_idle()?;
            self.session.send(Input::with_board(
                InputKind::AnimationsFinished,
                self.board.clone(),
            ))?;
        }
    }
}

fn random_rock<R: Rng + ?Sized>(rng: &mut R) -> TileType {
    let color = ROCK_COLORS.choose(rng).copied().unwrap_or(Color::Red);
    TileType::rock(color)
}

fn demo_board<R: Rng + ?Sized>(rng: &mut R) -> Result<Board> {
    let rows = (0..ROWS)
        .map(|_| (0..COLUMNS).map(|_| random_rock(rng)).collect())
        .collect();
    let mut board = Board::from_rows(rows)?;
    board.set(TileCoord::new(0, COLUMNS / 2), TileType::player(10))?;
    board.set(TileCoord::new(ROWS / 2, 0), TileType::pillar(Color::Blue, 3))?;
    Ok(board)
}

/// Applies the board effect of `trigger`.
fn transform<R: Rng + ?Sized>(
    board: &Board,
    trigger: &Input,
    rng: &mut R,
) -> Result<(Transformation, Board)> {
    let mut next = board.clone();
    let removed: Vec<TileCoord> = match &trigger.kind {
        InputKind::Touch { coord, .. } => vec![*coord],
        InputKind::BossEatsRocks(coords) => coords.clone(),
        InputKind::BossAttacks(attacks) => {
            let mut removed = Vec::new();
            for attack in attacks {
                match attack {
                    BossAttack::Bomb(coord) => removed.push(*coord),
                    BossAttack::Destroy(line) => removed.extend(line.cells.iter().copied()),
                    BossAttack::Spawn { coord, monster } => {
                        next.set(*coord, TileType::monster(*monster, 2))?;
                    }
                    // Poison only hurts the player; the referee owns health.
                    BossAttack::Hair(_) => {}
                }
            }
            removed
        }
        _ => Vec::new(),
    };

    let moves = collapse(&mut next, &removed, rng)?;
    let transformation = Transformation::caused_by(trigger.tag())
        .with_removed(removed)
        .with_tile_transformations(moves);
    Ok((transformation, next))
}

/// Removes `removed`, lets each column fall and refills the top.
fn collapse<R: Rng + ?Sized>(
    board: &mut Board,
    removed: &[TileCoord],
    rng: &mut R,
) -> Result<Vec<TileTransformation>> {
    let mut moves = Vec::new();
    for column in 0..board.columns() {
        let survivors: Vec<(TileCoord, TileType)> = (0..board.rows())
            .map(|row| TileCoord::new(row, column))
            .filter(|coord| !removed.contains(coord))
            .filter_map(|coord| board.get(coord).cloned().map(|tile| (coord, tile)))
            .collect();

        let landed = survivors.len();
        for (row, (from, tile)) in survivors.into_iter().enumerate() {
            let to = TileCoord::new(row, column);
            if from != to {
                moves.push(TileTransformation::new(from, to));
            }
            board.set(to, tile)?;
        }
        for row in landed..board.rows() {
            board.set(TileCoord::new(row, column), random_rock(rng))?;
        }
    }
    Ok(moves)
}
