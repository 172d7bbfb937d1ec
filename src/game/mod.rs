//! Core Kalah game logic: circular pit layout, players, rule variants and the
//! board state machine.

mod board;
mod player;
mod rules;
mod state;

pub use board::{
    checked_layout_total, checked_seed_total, Board, DEFAULT_PITS_PER_PLAYER,
    DEFAULT_SEEDS_PER_PIT, MAX_TOTAL_SEEDS,
};
pub use player::Player;
pub use rules::{Rules, SweepRule};
pub use state::{BoardState, GameOutcome};
