use std::fmt;
use std::hash::{Hash, Hasher};

use super::{
    checked_layout_total, checked_seed_total, Board, Player, Rules, SweepRule, MAX_TOTAL_SEEDS,
};
use crate::error::{ConfigError, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Complete Kalah position: pits, stores, side to move and terminal flag.
///
/// `play_pit` is the only mutator. Cloning yields a fully independent
/// position, which is how the search explores hypothetical lines.
///
/// Equality and hashing compare the position only, not how it was reached.
#[derive(Debug, Clone)]
pub struct BoardState {
    board: Board,
    current_player: Player,
    over: bool,
    rules: Rules,
    total: u32,
    extra_turn: bool,
}

impl BoardState {
    /// Create the starting position with default rules
    pub fn new(
        seeds_per_pit: u32,
        pits_per_player: usize,
        starting_player: Player,
    ) -> Result<Self, ConfigError> {
        Self::with_rules(seeds_per_pit, pits_per_player, starting_player, Rules::default())
    }

    /// Create the starting position for a rule variant
    pub fn with_rules(
        seeds_per_pit: u32,
        pits_per_player: usize,
        starting_player: Player,
        rules: Rules,
    ) -> Result<Self, ConfigError> {
        if pits_per_player == 0 {
            return Err(ConfigError::Validation(
                "pits_per_player must be > 0".into(),
            ));
        }
        if seeds_per_pit == 0 {
            return Err(ConfigError::Validation("seeds_per_pit must be > 0".into()));
        }
        let total = checked_seed_total(pits_per_player, seeds_per_pit).ok_or_else(|| {
            ConfigError::Validation(format!(
                "{} pits of {} seeds exceed the limit of {} seeds",
                2 * pits_per_player as u128,
                seeds_per_pit,
                MAX_TOTAL_SEEDS
            ))
        })?;

        let board = Board::new(pits_per_player, seeds_per_pit);
        Ok(BoardState {
            total,
            board,
            current_player: starting_player,
            over: false,
            rules,
            extra_turn: false,
        })
    }

    /// Build an arbitrary position from a full pit layout (stores included).
    ///
    /// A layout where one side is already empty is accepted as finished; no
    /// sweep is applied to it.
    pub fn from_pits(
        pits: Vec<u32>,
        current_player: Player,
        rules: Rules,
    ) -> Result<Self, ConfigError> {
        if pits.len() < 4 || pits.len() % 2 != 0 {
            return Err(ConfigError::Validation(format!(
                "pit layout must have an even length of at least 4, got {}",
                pits.len()
            )));
        }

        let total = checked_layout_total(&pits).ok_or_else(|| {
            ConfigError::Validation(format!(
                "pit layout exceeds the limit of {} seeds",
                MAX_TOTAL_SEEDS
            ))
        })?;

        let board = Board::from_vec(pits);
        let over = Self::side_exhausted(&board);
        Ok(BoardState {
            total,
            board,
            current_player,
            over,
            rules,
            extra_turn: false,
        })
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pits_per_player(&self) -> usize {
        self.board.pits_per_player()
    }

    /// Every position on the board, stores included
    pub fn all_pits(&self) -> &[u32] {
        self.board.as_slice()
    }

    /// A player's non-store pits in index order
    pub fn pits(&self, player: Player) -> &[u32] {
        self.board.side(player)
    }

    /// Seeds currently in a player's store
    pub fn score(&self, player: Player) -> u32 {
        self.board.get(self.board.store_index(player))
    }

    pub fn store_index(&self, player: Player) -> usize {
        self.board.store_index(player)
    }

    pub fn owner(&self, index: usize) -> Option<Player> {
        self.board.owner(index)
    }

    /// Seeds on the board; constant for the lifetime of the position
    pub fn total_seeds(&self) -> u32 {
        self.total
    }

    /// Whether the last successful move left the mover on turn
    pub fn last_move_extra_turn(&self) -> bool {
        self.extra_turn
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.over {
            return None;
        }

        let lower = self.score(Player::Lower);
        let upper = self.score(Player::Upper);
        Some(if lower > upper {
            GameOutcome::Winner(Player::Lower)
        } else if upper > lower {
            GameOutcome::Winner(Player::Upper)
        } else {
            GameOutcome::Draw
        })
    }

    /// Non-empty pits of the side to move, ascending
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.over {
            return Vec::new();
        }

        self.board
            .side_range(self.current_player)
            .filter(|&index| self.board.get(index) > 0)
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, pit: usize) -> Result<BoardState, MoveError> {
        let mut next = self.clone();
        next.play_pit(pit)?;
        Ok(next)
    }

    /// Sow the seeds of `pit` for the side to move.
    ///
    /// Validation runs before anything is modified, so on error the position
    /// is unchanged.
    pub fn play_pit(&mut self, pit: usize) -> Result<(), MoveError> {
        self.check_move(pit)?;

        let mover = self.current_player;
        let own_store = self.board.store_index(mover);
        let skipped_store = self
            .rules
            .skip_opponent_store
            .then(|| self.board.store_index(mover.other()));

        let mut seeds = self.board.take(pit);
        let mut index = pit;
        while seeds > 0 {
            index = self.board.next_index(index);
            if Some(index) == skipped_store {
                continue;
            }

            if seeds == 1 && self.board.get(index) == 0 && self.board.owner(index) == Some(mover)
            {
                self.capture(index, own_store);
            } else {
                self.board.add(index, 1);
            }
            seeds -= 1;
        }

        self.over = Self::side_exhausted(&self.board);
        if self.over {
            self.sweep();
        }

        // Landing in the own store keeps the turn, even on the final move.
        self.extra_turn = index == own_store;
        if !self.extra_turn {
            self.current_player = mover.other();
        }

        debug_assert_eq!(self.board.total(), self.total, "seed count changed");
        Ok(())
    }

    fn check_move(&self, pit: usize) -> Result<(), MoveError> {
        if self.over {
            return Err(MoveError::GameOver);
        }
        if pit >= self.board.len() {
            return Err(MoveError::OutOfBounds {
                index: pit,
                len: self.board.len(),
            });
        }
        if self.board.get(pit) == 0 {
            return Err(MoveError::EmptyPit(pit));
        }
        if self.board.owner(pit) != Some(self.current_player) {
            return Err(MoveError::WrongOwner {
                index: pit,
                player: self.current_player,
            });
        }
        Ok(())
    }

    /// Last seed landed in the empty own-side pit `index`. Takes the seed and
    /// the opposite pit's seeds into the store when the opposite pit is
    /// occupied; otherwise the seed simply stays.
    fn capture(&mut self, index: usize, own_store: usize) {
        let captured = match self.board.mirror(index) {
            Some(across) => self.board.take(across),
            None => 0,
        };
        if captured > 0 {
            self.board.add(own_store, 1 + captured);
        } else {
            self.board.add(index, 1);
        }
    }

    fn sweep(&mut self) {
        let lower_rest = self.board.clear_side(Player::Lower);
        let upper_rest = self.board.clear_side(Player::Upper);
        let lower_store = self.board.store_index(Player::Lower);
        let upper_store = self.board.store_index(Player::Upper);

        match self.rules.sweep {
            SweepRule::Opposite => {
                self.board.add(lower_store, upper_rest);
                self.board.add(upper_store, lower_rest);
            }
            SweepRule::Own => {
                self.board.add(lower_store, lower_rest);
                self.board.add(upper_store, upper_rest);
            }
        }
    }

    fn side_exhausted(board: &Board) -> bool {
        board.side_sum(Player::Lower) == 0 || board.side_sum(Player::Upper) == 0
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.current_player == other.current_player
            && self.over == other.over
            && self.rules == other.rules
    }
}

impl Eq for BoardState {}

impl Hash for BoardState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.current_player.hash(state);
        self.over.hash(state);
        self.rules.hash(state);
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper_store = self.store_index(Player::Upper);
        let lower_store = self.store_index(Player::Lower);
        let upper: Vec<u32> = self.all_pits()[lower_store + 1..=upper_store]
            .iter()
            .rev()
            .copied()
            .collect();
        writeln!(f, "Upper Player: {:?}", upper)?;
        write!(f, "Lower Player: {:?}", &self.all_pits()[..=lower_store])
    }
}
