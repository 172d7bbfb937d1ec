use std::ops::Range;

use super::Player;

pub const DEFAULT_PITS_PER_PLAYER: usize = 6;
pub const DEFAULT_SEEDS_PER_PIT: u32 = 4;

/// Most seeds a board may hold. Half the `i32` range, so a store margin plus
/// a win bonus still fits a search score.
pub const MAX_TOTAL_SEEDS: u32 = i32::MAX as u32 / 2;

/// Seeds on a fresh board, or `None` when it would exceed [`MAX_TOTAL_SEEDS`]
pub fn checked_seed_total(pits_per_player: usize, seeds_per_pit: u32) -> Option<u32> {
    let pits = u64::try_from(pits_per_player).ok()?.checked_mul(2)?;
    let total = pits.checked_mul(u64::from(seeds_per_pit))?;
    u32::try_from(total).ok().filter(|&t| t <= MAX_TOTAL_SEEDS)
}

/// Sum of an arbitrary layout, or `None` when it exceeds [`MAX_TOTAL_SEEDS`]
pub fn checked_layout_total(pits: &[u32]) -> Option<u32> {
    pits.iter()
        .try_fold(0u32, |acc, &seeds| acc.checked_add(seeds))
        .filter(|&t| t <= MAX_TOTAL_SEEDS)
}

/// Circular pit layout shared by both players.
///
/// Index 0 upward: Lower's pits, Lower's store at `pits_per_player`,
/// Upper's pits, then Upper's store at `2 * pits_per_player + 1`.
/// Seeds travel towards higher indices and wrap around to 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pits: Vec<u32>,
    pits_per_player: usize,
}

impl Board {
    /// Create a board with `seeds_per_pit` seeds in every non-store pit
    pub fn new(pits_per_player: usize, seeds_per_pit: u32) -> Self {
        let mut pits = Vec::with_capacity(2 * pits_per_player + 2);
        for _ in 0..2 {
            pits.extend(std::iter::repeat(seeds_per_pit).take(pits_per_player));
            pits.push(0);
        }
        Board {
            pits,
            pits_per_player,
        }
    }

    /// Wrap an existing layout. The caller guarantees an even length of at
    /// least 4.
    pub(crate) fn from_vec(pits: Vec<u32>) -> Self {
        let pits_per_player = pits.len() / 2 - 1;
        Board {
            pits,
            pits_per_player,
        }
    }

    pub fn pits_per_player(&self) -> usize {
        self.pits_per_player
    }

    /// Number of positions, stores included
    pub fn len(&self) -> usize {
        self.pits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pits.is_empty()
    }

    pub fn get(&self, index: usize) -> u32 {
        self.pits[index]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.pits
    }

    pub fn store_index(&self, player: Player) -> usize {
        match player {
            Player::Lower => self.pits_per_player,
            Player::Upper => 2 * self.pits_per_player + 1,
        }
    }

    pub fn is_store(&self, index: usize) -> bool {
        index == self.store_index(Player::Lower) || index == self.store_index(Player::Upper)
    }

    /// Indices of a player's non-store pits
    pub fn side_range(&self, player: Player) -> Range<usize> {
        match player {
            Player::Lower => 0..self.pits_per_player,
            Player::Upper => self.pits_per_player + 1..2 * self.pits_per_player + 1,
        }
    }

    /// Owner of a non-store pit. Stores and out-of-range indices have none.
    pub fn owner(&self, index: usize) -> Option<Player> {
        if self.side_range(Player::Lower).contains(&index) {
            Some(Player::Lower)
        } else if self.side_range(Player::Upper).contains(&index) {
            Some(Player::Upper)
        } else {
            None
        }
    }

    /// The pit directly across the board from a non-store pit. Stores and
    /// out-of-range indices have none.
    pub fn mirror(&self, index: usize) -> Option<usize> {
        self.owner(index).map(|_| 2 * self.pits_per_player - index)
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.pits.len()
    }

    pub fn side(&self, player: Player) -> &[u32] {
        &self.pits[self.side_range(player)]
    }

    pub fn side_sum(&self, player: Player) -> u32 {
        self.side(player).iter().sum()
    }

    pub fn total(&self) -> u32 {
        self.pits.iter().sum()
    }

    pub(crate) fn add(&mut self, index: usize, seeds: u32) {
        self.pits[index] += seeds;
    }

    /// Empty a pit, returning the seeds it held
    pub(crate) fn take(&mut self, index: usize) -> u32 {
        std::mem::take(&mut self.pits[index])
    }

    /// Empty every non-store pit of a player, returning the seeds removed
    pub(crate) fn clear_side(&mut self, player: Player) -> u32 {
        let range = self.side_range(player);
        let removed = self.pits[range.clone()].iter().sum();
        self.pits[range].fill(0);
        removed
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_PITS_PER_PLAYER, DEFAULT_SEEDS_PER_PIT)
    }
}
