use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DraftKings Classic roster positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    DST,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a position label cannot be mapped to a roster slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosition(pub String);

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown position '{}'", self.0)
    }
}

impl std::error::Error for UnknownPosition {}

impl FromStr for Position {
    type Err = UnknownPosition;

    /// Normalizes the labels found in salary exports ("QB1", "D/ST", "Def", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_uppercase();

        if raw.starts_with("QB") {
            Ok(Position::QB)
        } else if raw.starts_with("RB") {
            Ok(Position::RB)
        } else if raw.starts_with("WR") {
            Ok(Position::WR)
        } else if raw.starts_with("TE") {
            Ok(Position::TE)
        } else if raw.starts_with("DEF") || matches!(raw.as_str(), "DST" | "D/ST" | "D") {
            Ok(Position::DST)
        } else {
            Err(UnknownPosition(s.trim().to_string()))
        }
    }
}

/// A fantasy football player available on the slate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID within a pool (e.g., "FT_KC_Patrick_Mahomes")
    pub id: String,
    /// Player name (e.g., "Patrick Mahomes")
    pub name: String,
    /// Roster position
    pub position: Position,
    /// Team abbreviation (e.g., "KC"); empty when unknown
    pub team: String,
    /// Opponent team abbreviation, if known
    #[serde(default)]
    pub opponent: Option<String>,
    /// Projected fantasy points for the week
    pub proj: f64,
    /// DraftKings salary in dollars
    pub salary: u32,
    /// Defense/special teams flag, used for the DST slot
    #[serde(default)]
    pub is_dst: bool,
}

impl Player {
    /// Create a new player; the DST flag follows the position
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        proj: f64,
        salary: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            team: team.into(),
            opponent: None,
            proj,
            salary,
            is_dst: position == Position::DST,
        }
    }

    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("QB".parse::<Position>().unwrap(), Position::QB);
        assert_eq!(" rb ".parse::<Position>().unwrap(), Position::RB);
        assert_eq!("WR1".parse::<Position>().unwrap(), Position::WR);
        assert_eq!("TE".parse::<Position>().unwrap(), Position::TE);

        // All the defense spellings seen in salary exports
        for label in ["DST", "D/ST", "D", "Def", "DEFENSE"] {
            assert_eq!(label.parse::<Position>().unwrap(), Position::DST, "label {label}");
        }

        assert_eq!("K".parse::<Position>(), Err(UnknownPosition("K".to_string())));
    }

    #[test]
    fn test_player_new_sets_dst_flag() {
        let dst = Player::new("DST_KC", "Chiefs", Position::DST, "KC", 7.0, 3200);
        assert!(dst.is_dst);

        let wr = Player::new("WR_KC", "Wideout", Position::WR, "KC", 14.0, 6000);
        assert!(!wr.is_dst);
    }

    #[test]
    fn test_player_serde_uses_uppercase_positions() {
        let player = Player::new("QB1", "Quarterback One", Position::QB, "NE", 22.5, 6500)
            .with_opponent("NYJ");
        let json = serde_json::to_string(&player).unwrap();
        assert!(json.contains("\"position\":\"QB\""));

        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, player);
    }
}
