use std::path::PathBuf;

use crate::game::Player;

/// Errors returned when a move cannot be applied to a board.
///
/// Every variant is raised before any pit is touched, so a failed move
/// leaves the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,

    #[error("pit index {index} is out of bounds (board has {len} positions)")]
    OutOfBounds { index: usize, len: usize },

    #[error("pit {0} is empty")]
    EmptyPit(usize),

    #[error("pit {index} does not belong to {player}")]
    WrongOwner { index: usize, player: Player },
}

/// Errors that can occur when building a board, a search engine, or loading
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::OutOfBounds { index: 20, len: 14 };
        assert_eq!(
            err.to_string(),
            "pit index 20 is out of bounds (board has 14 positions)"
        );
        assert_eq!(MoveError::EmptyPit(3).to_string(), "pit 3 is empty");
    }

    #[test]
    fn test_wrong_owner_display() {
        let err = MoveError::WrongOwner {
            index: 6,
            player: Player::Lower,
        };
        assert_eq!(err.to_string(), "pit 6 does not belong to Lower");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.max_depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.max_depth must be >= 1"
        );
    }
}
