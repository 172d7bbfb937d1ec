use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::game::{
    checked_seed_total, BoardState, Player, Rules, DEFAULT_PITS_PER_PLAYER,
    DEFAULT_SEEDS_PER_PIT, MAX_TOTAL_SEEDS,
};

/// Deepest search the configuration accepts. Search recursion is bounded by
/// this value.
pub const MAX_SEARCH_DEPTH: usize = 32;

/// Board dimensions, starting side and rule variant.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pits_per_player: usize,
    pub seeds_per_pit: u32,
    pub starting_player: Player,
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            pits_per_player: DEFAULT_PITS_PER_PLAYER,
            seeds_per_pit: DEFAULT_SEEDS_PER_PIT,
            starting_player: Player::Upper,
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Build the starting position described by this config
    pub fn new_board(&self) -> Result<BoardState, ConfigError> {
        BoardState::with_rules(
            self.seeds_per_pit,
            self.pits_per_player,
            self.starting_player,
            self.rules,
        )
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: usize,
    /// Print every root move's score to stderr
    pub trace: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 6,
            trace: false,
        }
    }
}

/// Who makes the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Human,
    Minimax,
    Random,
}

impl FromStr for Controller {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Controller::Human),
            "minimax" => Ok(Controller::Minimax),
            "random" => Ok(Controller::Random),
            other => Err(ConfigError::Validation(format!(
                "unknown controller '{}' (expected 'human', 'minimax', or 'random')",
                other
            ))),
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Controller::Human => "human",
            Controller::Minimax => "minimax",
            Controller::Random => "random",
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub upper: Controller,
    pub lower: Controller,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            upper: Controller::Human,
            lower: Controller::Minimax,
        }
    }
}

impl PlayersConfig {
    pub fn controller(&self, player: Player) -> Controller {
        match player {
            Player::Upper => self.upper,
            Player::Lower => self.lower,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
    pub players: PlayersConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.pits_per_player == 0 {
            return Err(ConfigError::Validation(
                "game.pits_per_player must be > 0".into(),
            ));
        }
        if self.game.seeds_per_pit == 0 {
            return Err(ConfigError::Validation(
                "game.seeds_per_pit must be > 0".into(),
            ));
        }
        if checked_seed_total(self.game.pits_per_player, self.game.seeds_per_pit).is_none() {
            return Err(ConfigError::Validation(format!(
                "game board must hold at most {} seeds in total",
                MAX_TOTAL_SEEDS
            )));
        }
        if self.search.max_depth == 0 {
            return Err(ConfigError::Validation(
                "search.max_depth must be >= 1".into(),
            ));
        }
        if self.search.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.max_depth must be <= {}",
                MAX_SEARCH_DEPTH
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SweepRule;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.pits_per_player, 6);
        assert_eq!(config.game.seeds_per_pit, 4);
        assert_eq!(config.game.starting_player, Player::Upper);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
pits_per_player = 3
starting_player = "lower"

[game.rules]
sweep = "own"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.pits_per_player, 3);
        assert_eq!(config.game.starting_player, Player::Lower);
        assert_eq!(config.game.rules.sweep, SweepRule::Own);
        // Other fields should be defaults
        assert_eq!(config.game.seeds_per_pit, 4);
        assert_eq!(config.search.max_depth, 6);
        assert_eq!(config.players.lower, Controller::Minimax);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_depth() {
        let mut config = AppConfig::default();
        config.search.max_depth = MAX_SEARCH_DEPTH + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_board() {
        let mut config = AppConfig::default();
        config.game.pits_per_player = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.game.seeds_per_pit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_seed_overflow() {
        let mut config = AppConfig::default();
        config.game.seeds_per_pit = u32::MAX / 4;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        assert!(config.game.new_board().is_err());
    }

    #[test]
    fn test_unknown_controller_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[players]\nupper = \"robot\"");
        assert!(result.is_err());
        assert!("robot".parse::<Controller>().is_err());
        assert_eq!("random".parse::<Controller>().unwrap(), Controller::Random);
    }

    #[test]
    fn test_new_board_from_config() {
        let mut config = GameConfig::default();
        config.pits_per_player = 2;
        config.seeds_per_pit = 3;
        let board = config.new_board().unwrap();
        assert_eq!(board.all_pits(), &[3, 3, 0, 3, 3, 0]);
        assert_eq!(board.current_player(), Player::Upper);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_kalah.toml")).unwrap();
        assert_eq!(config.search.max_depth, 6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kalah.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
max_depth = 3
trace = true
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search.max_depth, 3);
        assert!(config.search.trace);
        // Others are defaults
        assert_eq!(config.game.pits_per_player, 6);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kalah.toml");
        std::fs::write(&path, "[search]\nmax_depth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
