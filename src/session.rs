//! Drives two agents through complete games.

use crate::ai::Agent;
use crate::error::MoveError;
use crate::game::{BoardState, GameOutcome, Player};

/// Result of playing a single game to completion.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Every move in order, with the side that made it
    pub moves: Vec<(Player, usize)>,
    pub final_state: BoardState,
    pub outcome: GameOutcome,
}

/// Play `state` to the end, asking each side's agent for its moves.
pub fn play_game(
    state: BoardState,
    upper: &mut dyn Agent,
    lower: &mut dyn Agent,
) -> Result<GameRecord, MoveError> {
    play_game_observed(state, upper, lower, |_, _, _| {})
}

/// Like [`play_game`], calling `on_move` with the new position, the mover and
/// the pit after every move.
pub fn play_game_observed(
    mut state: BoardState,
    upper: &mut dyn Agent,
    lower: &mut dyn Agent,
    mut on_move: impl FnMut(&BoardState, Player, usize),
) -> Result<GameRecord, MoveError> {
    let mut moves = Vec::new();

    while !state.is_over() {
        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Upper => &mut *upper,
            Player::Lower => &mut *lower,
        };
        let pit = agent.select_action(&state)?;
        state.play_pit(pit)?;
        moves.push((player, pit));
        on_move(&state, player, pit);
    }

    let outcome = state
        .outcome()
        .expect("terminal state must have an outcome");

    Ok(GameRecord {
        moves,
        final_state: state,
        outcome,
    })
}

/// Win/draw tally over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub upper_wins: u32,
    pub lower_wins: u32,
    pub draws: u32,
}

impl MatchStats {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::Upper) => self.upper_wins += 1,
            GameOutcome::Winner(Player::Lower) => self.lower_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.upper_wins + self.lower_wins + self.draws
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::Upper => self.upper_wins,
            Player::Lower => self.lower_wins,
        }
    }
}
