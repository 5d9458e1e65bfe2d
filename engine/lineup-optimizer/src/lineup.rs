use player_pool::{Player, Position};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// DraftKings Classic roster requirements
pub const QB_SLOTS: u32 = 1;
pub const RB_BASE: u32 = 2;
pub const WR_BASE: u32 = 3;
pub const TE_BASE: u32 = 1;
pub const FLEX_SLOTS: u32 = 1;
pub const DST_SLOTS: u32 = 1;

/// Total players in a lineup (9)
pub const ROSTER_SIZE: u32 = QB_SLOTS + RB_BASE + WR_BASE + TE_BASE + FLEX_SLOTS + DST_SLOTS;

/// Player-ID set identifying an accepted lineup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(BTreeSet<String>);

impl Fingerprint {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of player IDs shared with another fingerprint
    pub fn overlap(&self, other: &Fingerprint) -> usize {
        self.0.intersection(&other.0).count()
    }
}

/// A selected lineup, keyed by player ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    players: BTreeMap<String, Player>,
}

impl Lineup {
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        Self { players: players.into_iter().map(|p| (p.id.clone(), p)).collect() }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    /// Players in player-ID order
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Players in roster display order: QB, RB, WR, TE, DST, then salary descending
    pub fn players_by_slot(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by(|a, b| a.position.cmp(&b.position).then(b.salary.cmp(&a.salary)));
        players
    }

    pub fn count(&self, position: Position) -> usize {
        self.players.values().filter(|p| p.position == position).count()
    }

    /// Number of players carrying the DST flag
    pub fn dst_count(&self) -> usize {
        self.players.values().filter(|p| p.is_dst).count()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.players.keys().cloned())
    }

    /// Check the Classic roster shape: 1 QB, 1 DST, RB/WR/TE at their base
    /// counts plus exactly one flex
    pub fn has_valid_shape(&self) -> bool {
        let rb = self.count(Position::RB) as u32;
        let wr = self.count(Position::WR) as u32;
        let te = self.count(Position::TE) as u32;

        self.len() as u32 == ROSTER_SIZE
            && self.count(Position::QB) as u32 == QB_SLOTS
            && self.dst_count() as u32 == DST_SLOTS
            && rb >= RB_BASE
            && wr >= WR_BASE
            && te >= TE_BASE
            && rb + wr + te == RB_BASE + WR_BASE + TE_BASE + FLEX_SLOTS
    }
}
