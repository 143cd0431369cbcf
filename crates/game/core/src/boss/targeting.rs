//! Target and attack selection.
//!
//! Every search here is bounded: random probes are capped and then either
//! fall back to an exhaustive scan or report a [`SelectionError`] carrying
//! whatever was found.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::attack::{BossAttack, BossAttackType, LineAttack};
use super::error::SelectionError;
use crate::board::{Board, Line, TileCoord};
use crate::config::BossConfig;
use crate::error::BoardError;

/// Picks a uniformly random coordinate outside `excluded`.
///
/// Makes up to `max_attempts` random probes over the whole board, then picks
/// among the remaining candidates directly. `None` only when every cell is
/// excluded.
pub fn sample_point<R: Rng + ?Sized>(
    board: &Board,
    excluded: &BTreeSet<TileCoord>,
    max_attempts: u32,
    rng: &mut R,
) -> Option<TileCoord> {
    for _ in 0..max_attempts {
        let coord = TileCoord::new(
            rng.gen_range(0..board.rows()),
            rng.gen_range(0..board.columns()),
        );
        if !excluded.contains(&coord) {
            return Some(coord);
        }
        tracing::trace!(%coord, "probe hit an excluded tile");
    }

    let candidates: Vec<TileCoord> = board.coords().filter(|c| !excluded.contains(c)).collect();
    candidates.choose(rng).copied()
}

/// Chooses `count` distinct rocks for the boss to eat.
///
/// Only plain rocks (no gem) of an edible color qualify. Sampling is without
/// replacement. If fewer than `count` rocks qualify, the error carries the
/// ones that were picked.
pub fn choose_eat_targets<R: Rng + ?Sized>(
    board: &Board,
    config: &BossConfig,
    count: usize,
    rng: &mut R,
) -> Result<Vec<TileCoord>, SelectionError> {
    let mut excluded = board.coords_where(|tile| {
        !tile.is_plain_rock() || tile.rock_color().is_some_and(|c| !config.is_edible(c))
    });

    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count {
        let Some(coord) = sample_point(board, &excluded, config.max_point_attempts, rng) else {
            tracing::warn!(requested = count, found = chosen.len(), "not enough edible rocks");
            return Err(SelectionError::InsufficientCandidates {
                requested: count,
                partial: chosen,
            });
        };
        excluded.insert(coord);
        chosen.push(coord);
    }

    Ok(chosen)
}

/// Plans one batch of boss attacks against a single board snapshot.
///
/// Holds the exclusion state for the batch: `do_not_attack` starts with the
/// player, pillars and exits and grows with every claimed cell, and each row
/// and column can be attacked at most once.
#[derive(Debug)]
pub struct AttackPlanner<'a> {
    board: &'a Board,
    config: &'a BossConfig,
    player: TileCoord,
    do_not_attack: BTreeSet<TileCoord>,
    attacked_rows: BTreeSet<usize>,
    attacked_columns: BTreeSet<usize>,
    player_beams: usize,
}

impl<'a> AttackPlanner<'a> {
    /// Fails if the board has no player.
    pub fn new(board: &'a Board, config: &'a BossConfig) -> Result<Self, BoardError> {
        let player = board.player_coord()?;

        Ok(Self {
            board,
            config,
            player,
            do_not_attack: board.non_attackable(),
            attacked_rows: BTreeSet::new(),
            attacked_columns: BTreeSet::new(),
            player_beams: 0,
        })
    }

    pub fn do_not_attack(&self) -> &BTreeSet<TileCoord> {
        &self.do_not_attack
    }

    pub fn attacked_rows(&self) -> &BTreeSet<usize> {
        &self.attacked_rows
    }

    pub fn attacked_columns(&self) -> &BTreeSet<usize> {
        &self.attacked_columns
    }

    /// Targets every attack kind in order. Kinds that cannot be placed are
    /// dropped, so the result may be shorter than `kinds`.
    pub fn plan<R: Rng + ?Sized>(
        &mut self,
        kinds: &[BossAttackType],
        rng: &mut R,
    ) -> Vec<BossAttack> {
        kinds
            .iter()
            .filter_map(|&kind| match self.plan_one(kind, rng) {
                Ok(attack) => Some(attack),
                Err(err) => {
                    tracing::warn!(attack = ?kind, %err, "boss attack dropped during planning");
                    None
                }
            })
            .collect()
    }

    pub fn plan_one<R: Rng + ?Sized>(
        &mut self,
        kind: BossAttackType,
        rng: &mut R,
    ) -> Result<BossAttack, SelectionError> {
        match kind {
            BossAttackType::Dynamite => self.bomb(rng).map(BossAttack::Bomb),
            BossAttackType::SpawnMonster(monster) => self
                .spawn(rng)
                .map(|coord| BossAttack::Spawn { coord, monster }),
            BossAttackType::Poison => self.poison(rng).map(BossAttack::Hair),
            BossAttackType::Destroy => self.destroy(rng).map(BossAttack::Destroy),
        }
    }

    /// Any free tile on the board.
    pub fn bomb<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TileCoord, SelectionError> {
        let coord = sample_point(
            self.board,
            &self.do_not_attack,
            self.config.max_point_attempts,
            rng,
        )
        .ok_or(SelectionError::InsufficientCandidates {
            requested: 1,
            partial: Vec::new(),
        })?;

        self.do_not_attack.insert(coord);
        Ok(coord)
    }

    /// A free tile near the player, widening the radius until one is found.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TileCoord, SelectionError> {
        let start = self.config.spawn_radius.max(1);
        let widest = self.board.rows().max(self.board.columns()).max(start);

        for radius in start..=widest {
            let candidates: Vec<TileCoord> = self
                .board
                .coords()
                .filter(|c| {
                    c.chebyshev_distance(self.player) <= radius && !self.do_not_attack.contains(c)
                })
                .collect();

            if let Some(&coord) = candidates.choose(rng) {
                self.do_not_attack.insert(coord);
                return Ok(coord);
            }
            tracing::trace!(radius, "no spawn tile in range, widening");
        }

        Err(SelectionError::InsufficientCandidates {
            requested: 1,
            partial: Vec::new(),
        })
    }

    /// A row or column that has not been attacked in this batch.
    pub fn destroy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<LineAttack, SelectionError> {
        for _ in 0..self.config.max_point_attempts {
            let line = self.random_line(rng);
            if self.line_is_free(line) {
                return Ok(self.commit_line(line));
            }
        }

        let free: Vec<Line> = (0..self.board.rows())
            .map(Line::Row)
            .chain((0..self.board.columns()).map(Line::Column))
            .filter(|&line| self.line_is_free(line))
            .collect();

        let line = *free.choose(rng).ok_or(SelectionError::NoFreeLine {
            orientation: "row or column",
        })?;
        Ok(self.commit_line(line))
    }

    /// A poison beam.
    ///
    /// While fewer than `max_player_beams` beams cross the player, the
    /// player's own row and then column are preferred, forming a "+". After
    /// that, random lines are drawn; duplicates and lines crossing the player
    /// over the cap are discarded. Gives up after `max_poison_attempts` draws.
    pub fn poison<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<LineAttack, SelectionError> {
        if self.player_beams < self.config.max_player_beams {
            let plus = [Line::Row(self.player.row), Line::Column(self.player.column)];
            if let Some(line) = plus.into_iter().find(|&line| self.line_is_free(line)) {
                self.player_beams += 1;
                return Ok(self.commit_line(line));
            }
        }

        for attempt in 0..self.config.max_poison_attempts {
            let line = self.random_line(rng);
            if !self.line_is_free(line) {
                tracing::trace!(attempt, %line, "duplicate beam discarded");
                continue;
            }

            let hits_player = line.contains(self.player);
            if hits_player {
                if self.player_beams >= self.config.max_player_beams {
                    continue;
                }
                self.player_beams += 1;
            }
            return Ok(self.commit_line(line));
        }

        Err(SelectionError::NoFreeLine {
            orientation: "poison line",
        })
    }

    fn random_line<R: Rng + ?Sized>(&self, rng: &mut R) -> Line {
        if rng.gen_bool(0.5) {
            Line::Row(rng.gen_range(0..self.board.rows()))
        } else {
            Line::Column(rng.gen_range(0..self.board.columns()))
        }
    }

    fn line_is_free(&self, line: Line) -> bool {
        match line {
            Line::Row(row) => !self.attacked_rows.contains(&row),
            Line::Column(column) => !self.attacked_columns.contains(&column),
        }
    }

    /// Claims the line and every cell on it not already claimed in this batch.
    fn commit_line(&mut self, line: Line) -> LineAttack {
        match line {
            Line::Row(row) => self.attacked_rows.insert(row),
            Line::Column(column) => self.attacked_columns.insert(column),
        };

        let cells: BTreeSet<TileCoord> = self
            .board
            .line_coords(line)
            .into_iter()
            .filter(|c| !self.do_not_attack.contains(c))
            .collect();
        self.do_not_attack.extend(cells.iter().copied());

        LineAttack { line, cells }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::board::{Color, MonsterKind, TileType};
    use crate::test_support::{rock_board, sparse_rock_board};

    #[test]
    fn scenario_eight_red_rocks_six_targets() {
        let rocks: Vec<_> = (0..8).map(|i| TileCoord::new(i / 4, i % 4 + 1)).collect();
        let board = sparse_rock_board(6, 6, &rocks);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let targets = choose_eat_targets(&board, &config, 6, &mut rng).unwrap();

        assert_eq!(targets.len(), 6);
        let unique: BTreeSet<_> = targets.iter().collect();
        assert_eq!(unique.len(), 6);
        for target in &targets {
            assert_eq!(board.get(*target).unwrap().rock_color(), Some(Color::Red));
        }
    }

    #[test]
    fn eat_targets_skip_gems_and_inedible_colors() {
        let mut board = sparse_rock_board(3, 3, &[TileCoord::new(0, 0)]);
        board
            .set(TileCoord::new(0, 1), TileType::rock(Color::Brown))
            .unwrap();
        board
            .set(TileCoord::new(0, 2), TileType::rock(Color::Green))
            .unwrap();
        board
            .set(
                TileCoord::new(1, 0),
                TileType::Rock {
                    color: Color::Red,
                    holds_gem: true,
                    group_count: 1,
                },
            )
            .unwrap();
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let err = choose_eat_targets(&board, &config, 3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SelectionError::InsufficientCandidates {
                requested: 3,
                partial: vec![TileCoord::new(0, 0)],
            }
        );
    }

    #[test]
    fn eat_targets_terminate_on_empty_board() {
        let board = Board::filled(4, 4, TileType::Empty).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = choose_eat_targets(&board, &BossConfig::default(), 2, &mut rng).unwrap_err();
        assert!(err.into_partial().is_empty());
    }

    #[test]
    fn scenario_bombs_avoid_player_and_pillar() {
        let player = TileCoord::new(3, 3);
        let pillar = TileCoord::new(0, 0);
        let board = rock_board(6, 6, player, &[pillar]);
        let config = BossConfig::default();

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut planner = AttackPlanner::new(&board, &config).unwrap();
            let first = planner.bomb(&mut rng).unwrap();
            let second = planner.bomb(&mut rng).unwrap();

            assert_ne!(first, second);
            for coord in [first, second] {
                assert_ne!(coord, player);
                assert_ne!(coord, pillar);
            }
        }
    }

    #[test]
    fn planner_requires_player() {
        let board = Board::filled(3, 3, TileType::Empty).unwrap();
        let config = BossConfig::default();
        assert_eq!(
            AttackPlanner::new(&board, &config).unwrap_err(),
            BoardError::MissingPlayer
        );
    }

    #[test]
    fn poison_prefers_plus_then_respects_cap() {
        let player = TileCoord::new(2, 4);
        let board = rock_board(7, 7, player, &[]);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut planner = AttackPlanner::new(&board, &config).unwrap();

        let first = planner.poison(&mut rng).unwrap();
        let second = planner.poison(&mut rng).unwrap();
        assert_eq!(first.line, Line::Row(2));
        assert_eq!(second.line, Line::Column(4));

        for _ in 0..4 {
            let beam = planner.poison(&mut rng).unwrap();
            assert!(!beam.line.contains(player), "{} crosses the player", beam.line);
        }
    }

    #[test]
    fn line_cells_exclude_protected_tiles() {
        let player = TileCoord::new(1, 1);
        let pillar = TileCoord::new(1, 3);
        let board = rock_board(4, 4, player, &[pillar]);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut planner = AttackPlanner::new(&board, &config).unwrap();

        let beam = planner.poison(&mut rng).unwrap();
        assert_eq!(beam.line, Line::Row(1));
        assert_eq!(beam.cells.len(), 2);
        assert!(!beam.cells.contains(&player));
        assert!(!beam.cells.contains(&pillar));
    }

    #[test]
    fn destroy_runs_out_of_lines() {
        let board = rock_board(2, 2, TileCoord::ORIGIN, &[]);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut planner = AttackPlanner::new(&board, &config).unwrap();

        for _ in 0..4 {
            planner.destroy(&mut rng).unwrap();
        }
        assert!(matches!(
            planner.destroy(&mut rng),
            Err(SelectionError::NoFreeLine { .. })
        ));
    }

    #[test]
    fn spawn_lands_near_player_when_room() {
        let player = TileCoord::new(5, 5);
        let board = rock_board(11, 11, player, &[]);
        let config = BossConfig::default();

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut planner = AttackPlanner::new(&board, &config).unwrap();
            let coord = planner.spawn(&mut rng).unwrap();
            assert!(coord.chebyshev_distance(player) <= config.spawn_radius);
        }
    }

    #[test]
    fn spawn_widens_when_neighborhood_is_full() {
        let player = TileCoord::new(0, 0);
        let pillars: Vec<_> = TileCoord::new(0, 0)
            .orthogonal_neighbors()
            .chain(TileCoord::new(0, 0).diagonal_neighbors())
            .chain([TileCoord::new(2, 0), TileCoord::new(2, 1), TileCoord::new(2, 2)])
            .chain([TileCoord::new(0, 2), TileCoord::new(1, 2)])
            .collect();
        let board = rock_board(5, 5, player, &pillars);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut planner = AttackPlanner::new(&board, &config).unwrap();

        let coord = planner.spawn(&mut rng).unwrap();
        assert!(coord.chebyshev_distance(player) > 2);
    }

    #[test]
    fn plan_keeps_order_and_drops_unplaceable() {
        let board = rock_board(2, 2, TileCoord::ORIGIN, &[]);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut planner = AttackPlanner::new(&board, &config).unwrap();

        let kinds = [
            BossAttackType::Dynamite,
            BossAttackType::SpawnMonster(MonsterKind::Rat),
            BossAttackType::Dynamite,
            BossAttackType::Dynamite,
        ];
        let attacks = planner.plan(&kinds, &mut rng);

        // Three free tiles on a 2x2 board with one player.
        assert_eq!(attacks.len(), 3);
        assert!(matches!(attacks[0], BossAttack::Bomb(_)));
        assert!(matches!(attacks[1], BossAttack::Spawn { .. }));
    }

    #[test]
    fn lines_skip_cells_claimed_by_earlier_attacks() {
        let player = TileCoord::new(2, 2);
        let board = rock_board(6, 6, player, &[]);
        let config = BossConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut planner = AttackPlanner::new(&board, &config).unwrap();

        planner.do_not_attack.insert(TileCoord::new(2, 0));
        let beam = planner.poison(&mut rng).unwrap();

        assert_eq!(beam.line, Line::Row(2));
        assert!(!beam.cells.contains(&TileCoord::new(2, 0)));
        assert!(!beam.cells.contains(&player));
        assert_eq!(beam.cells.len(), 4);
    }

    proptest! {
        #[test]
        fn mixed_batches_never_share_a_cell(
            seed in any::<u64>(),
            rows in 3usize..9,
            columns in 3usize..9,
        ) {
            let player = TileCoord::new(rows / 2, columns / 2);
            let board = rock_board(rows, columns, player, &[TileCoord::ORIGIN]);
            let config = BossConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut planner = AttackPlanner::new(&board, &config).unwrap();

            let kinds = [
                BossAttackType::Dynamite,
                BossAttackType::SpawnMonster(MonsterKind::Bat),
                BossAttackType::Poison,
                BossAttackType::Dynamite,
                BossAttackType::Poison,
                BossAttackType::Destroy,
            ];
            let attacks = planner.plan(&kinds, &mut rng);

            let mut seen = BTreeSet::new();
            for attack in &attacks {
                for coord in attack.coords() {
                    prop_assert!(seen.insert(coord), "{} attacked twice in {:?}", coord, attacks);
                }
            }
        }

        #[test]
        fn point_attacks_never_overlap(
            seed in any::<u64>(),
            rows in 3usize..9,
            columns in 3usize..9,
            count in 1usize..6,
        ) {
            let player = TileCoord::new(rows / 2, columns / 2);
            let pillar = TileCoord::ORIGIN;
            let board = rock_board(rows, columns, player, &[pillar]);
            let config = BossConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut planner = AttackPlanner::new(&board, &config).unwrap();

            let mut seen = BTreeSet::new();
            for i in 0..count {
                let coord = if i % 2 == 0 {
                    planner.bomb(&mut rng).unwrap()
                } else {
                    planner.spawn(&mut rng).unwrap()
                };
                prop_assert!(coord != player && coord != pillar);
                prop_assert!(seen.insert(coord), "{} picked twice", coord);
            }
        }

        #[test]
        fn lines_are_never_attacked_twice(seed in any::<u64>(), batch in 1usize..8) {
            let board = rock_board(6, 6, TileCoord::new(2, 3), &[]);
            let config = BossConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut planner = AttackPlanner::new(&board, &config).unwrap();

            let mut rows = BTreeSet::new();
            let mut columns = BTreeSet::new();
            for i in 0..batch {
                let attack = if i % 2 == 0 {
                    planner.destroy(&mut rng)
                } else {
                    planner.poison(&mut rng)
                };
                let Ok(attack) = attack else { continue };
                match attack.line {
                    Line::Row(row) => prop_assert!(rows.insert(row)),
                    Line::Column(column) => prop_assert!(columns.insert(column)),
                }
            }
        }
    }
}
