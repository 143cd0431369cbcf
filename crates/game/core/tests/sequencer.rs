use proptest::prelude::*;
use shaft_core::{
    Color, Input, InputKind, InputQueue, InputTag, Phase, TileCoord, TileType, Transformation,
};

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop::sample::select(Phase::ALL.to_vec())
}

fn arb_kind() -> impl Strategy<Value = InputKind> {
    let coord = (0usize..8, 0usize..8).prop_map(|(r, c)| TileCoord::new(r, c));
    prop_oneof![
        coord.clone().prop_map(|coord| InputKind::Touch {
            coord,
            tile: TileType::rock(Color::Red),
        }),
        Just(InputKind::RotateLeft),
        Just(InputKind::RotateRight),
        Just(InputKind::GameWin),
        Just(InputKind::GameLose),
        Just(InputKind::Play),
        Just(InputKind::Pause),
        Just(InputKind::AnimationsFinished),
        Just(InputKind::PlayAgain),
        Just(InputKind::BoardBuilt),
        Just(InputKind::BoardLoaded),
        Just(InputKind::NewTurn),
        any::<bool>().prop_map(|new_turn| InputKind::ReffingFinished { new_turn }),
        (0u32..5).prop_map(|level| InputKind::SelectLevel { level }),
        prop::sample::select(vec![InputTag::Touch, InputTag::GameWin, InputTag::RotateLeft])
            .prop_map(|cause| InputKind::Transformation(vec![Transformation::caused_by(cause)])),
        prop::collection::vec(coord, 0..3).prop_map(InputKind::BossTargetsWhatToEat),
    ]
}

/// Self-transitions out of Playing; popping them never changes the phase.
fn arb_playing_self_loop() -> impl Strategy<Value = InputKind> {
    prop_oneof![
        Just(InputKind::BoardBuilt),
        Just(InputKind::BoardLoaded),
        (0usize..8, 0usize..8)
            .prop_map(|(r, c)| InputKind::BossTargetsWhatToEat(vec![TileCoord::new(r, c)])),
    ]
}

proptest! {
    #[test]
    fn admitted_inputs_pop_in_append_order(
        kinds in prop::collection::vec(arb_playing_self_loop(), 0..20),
    ) {
        let mut queue = InputQueue::new();
        for kind in &kinds {
            prop_assert!(queue.append(Input::new(kind.clone())));
        }

        let mut popped = Vec::new();
        while let Some(input) = queue.pop() {
            popped.push(input.kind);
        }

        prop_assert_eq!(popped, kinds);
        prop_assert_eq!(queue.phase(), Phase::Playing);
    }

    #[test]
    fn rejected_inputs_never_enter_the_queue(
        phase in arb_phase(),
        kinds in prop::collection::vec(arb_kind(), 0..20),
    ) {
        let mut queue = InputQueue::with_phase(phase);
        let mut expected = Vec::new();
        for kind in kinds {
            let admissible = phase.admits(&kind);
            prop_assert_eq!(queue.append(Input::new(kind.clone())), admissible);
            if admissible {
                expected.push(kind);
            }
        }

        let queued: Vec<_> = queue.iter().map(|input| input.kind.clone()).collect();
        prop_assert_eq!(queued, expected);
        prop_assert_eq!(queue.phase(), phase);
    }

    #[test]
    fn pop_moves_only_along_the_table(
        phase in arb_phase(),
        kind in arb_kind(),
    ) {
        let mut queue = InputQueue::with_phase(phase);
        let input = Input::new(kind);
        let expected = phase.transition(&input);
        let admitted = queue.append(input);

        let popped = queue.pop();
        match (admitted, expected) {
            (true, Some(next)) => {
                prop_assert!(popped.is_some());
                prop_assert_eq!(queue.phase(), next);
            }
            _ => {
                prop_assert!(popped.is_none());
                prop_assert_eq!(queue.phase(), phase);
            }
        }
        prop_assert!(queue.is_empty());
    }
}

#[test]
fn one_full_player_turn() {
    let board = shaft_core::Board::filled(3, 3, TileType::rock(Color::Blue)).unwrap();
    let mut queue = InputQueue::new();
    let mut entered = Vec::new();
    let mut hook = |phase: Phase, _: &Input| entered.push(phase);

    let script = [
        Input::new(InputKind::RotateRight),
        Input::new(InputKind::Transformation(vec![Transformation::caused_by(
            InputTag::RotateRight,
        )])),
        Input::with_board(InputKind::AnimationsFinished, board),
        Input::new(InputKind::ReffingFinished { new_turn: true }),
    ];
    for input in script {
        assert!(queue.append(input));
        assert!(queue.pop_with(&mut hook).is_some());
    }

    assert_eq!(queue.phase(), Phase::Playing);
    assert_eq!(
        entered,
        vec![
            Phase::Computing,
            Phase::Animating,
            Phase::Reffing,
            Phase::Playing
        ]
    );
}

#[test]
fn pause_and_resume() {
    let mut queue = InputQueue::new();
    queue.append(Input::new(InputKind::Pause));
    queue.pop();
    assert_eq!(queue.phase(), Phase::Paused);

    assert!(!queue.append(Input::new(InputKind::RotateLeft)));
    assert!(queue.append(Input::new(InputKind::Play)));
    queue.pop();
    assert_eq!(queue.phase(), Phase::Playing);
}
