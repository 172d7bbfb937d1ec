use crate::config::SearchConfig;
use crate::error::{ConfigError, MoveError};
use crate::game::{BoardState, Player};

use super::agent::Agent;

pub type Score = i32;

/// Bonus for a finished game, added on top of the store margin.
pub const WIN_SCORE: Score = 1000;

/// Trait for evaluating a position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, state: &BoardState, player: Player) -> Score;
}

/// Store margin, plus a win/loss bonus once the game is over.
pub struct StoreDifference;

impl Heuristic for StoreDifference {
    fn evaluate(&self, state: &BoardState, player: Player) -> Score {
        let own = state.score(player) as Score;
        let opp = state.score(player.other()) as Score;

        let base = if !state.is_over() || own == opp {
            0
        } else if own > opp {
            WIN_SCORE
        } else {
            -WIN_SCORE
        };

        base + own - opp
    }
}

/// Result of one search from the root position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: usize,
    pub score: Score,
    /// Score of every root move, in the order they were searched
    pub root_scores: Vec<(usize, Score)>,
    /// Positions generated during the search
    pub nodes: u64,
}

/// Depth-bounded minimax with alpha-beta pruning.
///
/// The engine keeps no state between calls. Every line is explored on clones
/// of the caller's position.
pub struct MoveSearch {
    max_depth: usize,
    player: Player,
    trace: bool,
    heuristic: Box<dyn Heuristic>,
}

impl MoveSearch {
    pub fn new(max_depth: usize, player: Player) -> Result<Self, ConfigError> {
        Self::with_heuristic(max_depth, player, Box::new(StoreDifference))
    }

    pub fn with_heuristic(
        max_depth: usize,
        player: Player,
        heuristic: Box<dyn Heuristic>,
    ) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::Validation(
                "max_search_depth must be >= 1".into(),
            ));
        }
        Ok(MoveSearch {
            max_depth,
            player,
            trace: false,
            heuristic,
        })
    }

    pub fn from_config(config: &SearchConfig, player: Player) -> Result<Self, ConfigError> {
        let mut search = Self::new(config.max_depth, player)?;
        search.trace = config.trace;
        Ok(search)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The side this engine was configured to play
    pub fn player(&self) -> Player {
        self.player
    }

    /// Score `state` for `maximizing_player`
    pub fn evaluate(&self, state: &BoardState, maximizing_player: Player) -> Score {
        self.heuristic.evaluate(state, maximizing_player)
    }

    /// Pick a pit for the side to move in `state`
    pub fn get_move(&self, state: &BoardState) -> Result<usize, MoveError> {
        Ok(self.search(state)?.best_move)
    }

    /// Search every root move and report the best one.
    ///
    /// Root moves are tried in ascending pit order and only a strictly
    /// better score replaces the current best, so ties go to the lowest pit.
    pub fn search(&self, state: &BoardState) -> Result<SearchReport, MoveError> {
        if state.is_over() {
            return Err(MoveError::GameOver);
        }

        let maximizing = state.current_player();
        let mut nodes = 0;
        let mut best: Option<(usize, Score)> = None;
        let mut root_scores = Vec::new();

        for pit in state.valid_moves() {
            let score = self.alphabeta(
                state,
                pit,
                self.max_depth - 1,
                Score::MIN,
                Score::MAX,
                maximizing,
                &mut nodes,
            )?;
            if self.trace {
                eprintln!("[search] {} pit {}: {}", maximizing, pit, score);
            }
            root_scores.push((pit, score));
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pit, score));
            }
        }

        // A position that is not over always has a move for the side to move.
        let (best_move, score) = best.ok_or(MoveError::GameOver)?;
        if self.trace {
            eprintln!("[search] best pit {} ({}), {} nodes", best_move, score, nodes);
        }

        Ok(SearchReport {
            best_move,
            score,
            root_scores,
            nodes,
        })
    }

    /// Value of playing `pit` in `state`, looking `depth` further plies ahead.
    pub fn minimax(
        &self,
        state: &BoardState,
        pit: usize,
        depth: usize,
        alpha: Score,
        beta: Score,
        maximizing_player: Player,
    ) -> Result<Score, MoveError> {
        let mut nodes = 0;
        self.alphabeta(state, pit, depth, alpha, beta, maximizing_player, &mut nodes)
    }

    // Extra turns mean the side to move does not alternate with depth, so a
    // node maximizes exactly when its mover is the root mover.
    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &self,
        state: &BoardState,
        pit: usize,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing_player: Player,
        nodes: &mut u64,
    ) -> Result<Score, MoveError> {
        let next = state.apply_move(pit)?;
        *nodes += 1;

        if next.is_over() || depth == 0 {
            return Ok(self.evaluate(&next, maximizing_player));
        }

        if next.current_player() == maximizing_player {
            let mut value = Score::MIN;
            for child in next.valid_moves() {
                let score =
                    self.alphabeta(&next, child, depth - 1, alpha, beta, maximizing_player, nodes)?;
                value = value.max(score);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            Ok(value)
        } else {
            let mut value = Score::MAX;
            for child in next.valid_moves() {
                let score =
                    self.alphabeta(&next, child, depth - 1, alpha, beta, maximizing_player, nodes)?;
                value = value.min(score);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            Ok(value)
        }
    }
}

impl Agent for MoveSearch {
    fn select_action(&mut self, state: &BoardState) -> Result<usize, MoveError> {
        self.get_move(state)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
