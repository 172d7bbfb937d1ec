mod agent;
mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{Heuristic, MoveSearch, Score, SearchReport, StoreDifference, WIN_SCORE};
pub use random::RandomAgent;
