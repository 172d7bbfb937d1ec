//! Property-based tests for board and search invariants

use kalah::ai::{MoveSearch, Score};
use kalah::error::MoveError;
use kalah::game::{BoardState, Player, Rules, SweepRule};
use proptest::prelude::*;
use proptest::sample::Index;

fn player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Upper), Just(Player::Lower)]
}

fn rules() -> impl Strategy<Value = Rules> {
    (any::<bool>(), any::<bool>()).prop_map(|(own, skip)| Rules {
        sweep: if own { SweepRule::Own } else { SweepRule::Opposite },
        skip_opponent_store: skip,
    })
}

// Fresh board plus a list of choices that pick among the legal moves
fn game(max_pits: usize) -> impl Strategy<Value = (BoardState, Vec<Index>)> {
    (
        1..=max_pits,
        1u32..=4,
        player(),
        rules(),
        prop::collection::vec(any::<Index>(), 0..60),
    )
        .prop_map(|(pits, seeds, start, rules, choices)| {
            let state = BoardState::with_rules(seeds, pits, start, rules).unwrap();
            (state, choices)
        })
}

fn reachable(max_pits: usize) -> impl Strategy<Value = BoardState> {
    game(max_pits).prop_map(|(mut state, choices)| {
        for choice in choices {
            if state.is_over() {
                break;
            }
            let moves = state.valid_moves();
            state.play_pit(*choice.get(&moves)).unwrap();
        }
        state
    })
}

/// Index of the position that receives the last seed of `pit`
fn landing(state: &BoardState, pit: usize) -> usize {
    let len = state.all_pits().len();
    let skipped = state.store_index(state.current_player().other());
    let mut seeds = state.all_pits()[pit];
    let mut index = pit;
    while seeds > 0 {
        index = (index + 1) % len;
        if state.rules().skip_opponent_store && index == skipped {
            continue;
        }
        seeds -= 1;
    }
    index
}

fn full_minimax(
    search: &MoveSearch,
    state: &BoardState,
    pit: usize,
    depth: usize,
    maximizing: Player,
) -> Score {
    let next = state.apply_move(pit).unwrap();
    if next.is_over() || depth == 0 {
        return search.evaluate(&next, maximizing);
    }
    let scores = next
        .valid_moves()
        .into_iter()
        .map(|child| full_minimax(search, &next, child, depth - 1, maximizing));
    if next.current_player() == maximizing {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

proptest! {
    #[test]
    fn seeds_are_conserved((mut state, choices) in game(6)) {
        let total = state.total_seeds();
        for choice in choices {
            if state.is_over() {
                break;
            }
            let moves = state.valid_moves();
            state.play_pit(*choice.get(&moves)).unwrap();
            prop_assert_eq!(state.all_pits().iter().sum::<u32>(), total);
        }
    }

    #[test]
    fn valid_moves_are_sound(state in reachable(6)) {
        let moves = state.valid_moves();
        prop_assert_eq!(moves.is_empty(), state.is_over());
        prop_assert!(moves.windows(2).all(|w| w[0] < w[1]), "moves not ascending: {:?}", moves);
        for pit in moves {
            prop_assert_eq!(state.owner(pit), Some(state.current_player()));
            prop_assert!(state.all_pits()[pit] > 0);
        }
    }

    #[test]
    fn extra_turn_iff_last_seed_in_own_store((mut state, choices) in game(6)) {
        for choice in choices {
            if state.is_over() {
                break;
            }
            let moves = state.valid_moves();
            let pit = *choice.get(&moves);
            let mover = state.current_player();
            let own_store = state.store_index(mover);
            let lands_in_store = landing(&state, pit) == own_store;

            state.play_pit(pit).unwrap();
            prop_assert_eq!(state.last_move_extra_turn(), lands_in_store);
            if lands_in_store {
                prop_assert_eq!(state.current_player(), mover);
            } else {
                prop_assert_eq!(state.current_player(), mover.other());
            }
        }
    }

    #[test]
    fn finished_games_stay_finished(state in reachable(3), pit in 0usize..20) {
        if state.is_over() {
            let mut probe = state.clone();
            prop_assert_eq!(probe.play_pit(pit), Err(MoveError::GameOver));
            prop_assert!(probe.is_over());
            prop_assert_eq!(probe, state);
        }
    }

    #[test]
    fn failed_moves_leave_state_unchanged(state in reachable(4), pit in 0usize..12) {
        let mut probe = state.clone();
        if probe.play_pit(pit).is_err() {
            prop_assert_eq!(probe, state);
        }
    }

    #[test]
    fn pruning_matches_full_minimax(state in reachable(3), depth in 1usize..=4) {
        if !state.is_over() {
            let search = MoveSearch::new(depth, state.current_player()).unwrap();
            let maximizing = state.current_player();
            let report = search.search(&state).unwrap();

            let expected: Vec<(usize, Score)> = state
                .valid_moves()
                .into_iter()
                .map(|pit| (pit, full_minimax(&search, &state, pit, depth - 1, maximizing)))
                .collect();
            prop_assert_eq!(&report.root_scores, &expected);

            let top = expected.iter().map(|&(_, s)| s).max().unwrap();
            let first_top = expected.iter().find(|&&(_, s)| s == top).unwrap().0;
            prop_assert_eq!(report.best_move, first_top);
            prop_assert_eq!(report.score, top);
        }
    }
}
