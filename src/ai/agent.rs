use crate::error::MoveError;
use crate::game::BoardState;

/// Universal interface for anything that picks moves: search engines,
/// random players, or a human at the terminal.
pub trait Agent {
    /// Select a pit index for the side to move.
    ///
    /// Fails with [`MoveError::GameOver`] when the game has already ended.
    fn select_action(&mut self, state: &BoardState) -> Result<usize, MoveError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
