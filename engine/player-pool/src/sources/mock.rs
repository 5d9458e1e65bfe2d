//! Small fixed slate for demos and tests

use crate::types::{Player, Position};

/// 13-player mock slate: 2 QB, 3 RB, 3 WR, 2 TE, a filler RB and 2 DST.
///
/// Salaries leave room for several distinct lineups under the standard
/// $50,000 cap with at most three players per team.
pub fn players() -> Vec<Player> {
    vec![
        Player::new("QB1", "Quarterback One", Position::QB, "NE", 22.5, 6500).with_opponent("NYJ"),
        Player::new("QB2", "Quarterback Two", Position::QB, "KC", 20.0, 6000).with_opponent("DEN"),
        Player::new("RB1", "Running Back A", Position::RB, "DAL", 18.0, 7000).with_opponent("PHI"),
        Player::new("RB2", "Running Back B", Position::RB, "GB", 15.0, 6000).with_opponent("MIN"),
        Player::new("RB3", "Running Back C", Position::RB, "TEN", 12.0, 5000).with_opponent("HOU"),
        Player::new("WR1", "Wideout A", Position::WR, "GB", 17.0, 6800).with_opponent("MIN"),
        Player::new("WR2", "Wideout B", Position::WR, "KC", 16.0, 6400).with_opponent("DEN"),
        Player::new("WR3", "Wideout C", Position::WR, "NE", 14.0, 5800).with_opponent("NYJ"),
        Player::new("TE1", "Tight End One", Position::TE, "KC", 10.0, 4500).with_opponent("DEN"),
        Player::new("TE2", "Tight End Two", Position::TE, "DAL", 8.0, 3500).with_opponent("PHI"),
        Player::new("FLEX_RB", "Flex RB", Position::RB, "MIA", 9.0, 4000).with_opponent("BUF"),
        Player::new("DST1", "Defense Team 1", Position::DST, "NE", 7.0, 3000).with_opponent("NYJ"),
        Player::new("DST2", "Defense Team 2", Position::DST, "KC", 6.0, 2500).with_opponent("DEN"),
    ]
}
