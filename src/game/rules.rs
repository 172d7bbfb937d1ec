/// Where the seeds left on the board go when the game ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepRule {
    /// Each side's leftover seeds are credited to the opponent's store.
    #[default]
    Opposite,
    /// Each side's leftover seeds are credited to its own store.
    Own,
}

/// Rule switches that differ between Kalah variants.
///
/// The default sows into both stores and credits leftovers to the opposite
/// store at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Rules {
    pub sweep: SweepRule,
    pub skip_opponent_store: bool,
}

impl Rules {
    /// Standard Kalah: the opponent's store is skipped and leftovers stay
    /// with their owner.
    pub fn canonical() -> Self {
        Rules {
            sweep: SweepRule::Own,
            skip_opponent_store: true,
        }
    }
}
