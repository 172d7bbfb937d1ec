use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Upper,
    Lower,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Upper => Player::Lower,
            Player::Lower => Player::Upper,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Upper => "Upper",
            Player::Lower => "Lower",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
