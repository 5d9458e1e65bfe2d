use crate::error::PoolError;
use crate::types::{Player, Position};
use std::collections::{BTreeSet, HashMap};

/// Validated set of players for one slate
///
/// A pool is never empty and player IDs are unique; both are checked on
/// construction so downstream consumers can index players by ID.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    /// Players in ingestion order
    players: Vec<Player>,

    /// Map from player ID to index into `players`
    index_by_id: HashMap<String, usize>,
}

impl PlayerPool {
    /// Build a pool, rejecting empty input and duplicate IDs
    pub fn new(players: Vec<Player>) -> Result<Self, PoolError> {
        if players.is_empty() {
            return Err(PoolError::Empty);
        }

        let mut index_by_id = HashMap::with_capacity(players.len());
        for (index, player) in players.iter().enumerate() {
            if index_by_id.insert(player.id.clone(), index).is_some() {
                return Err(PoolError::DuplicateId(player.id.clone()));
            }
        }

        Ok(Self { players, index_by_id })
    }

    /// Get a player by ID
    pub fn get(&self, id: &str) -> Option<&Player> {
        self.index_by_id.get(id).map(|&index| &self.players[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Get all players in ingestion order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Distinct non-empty team codes, sorted
    pub fn teams(&self) -> Vec<&str> {
        let teams: BTreeSet<&str> = self
            .players
            .iter()
            .map(|p| p.team.as_str())
            .filter(|team| !team.is_empty())
            .collect();
        teams.into_iter().collect()
    }

    /// Number of players at each position, for ingestion diagnostics
    pub fn position_counts(&self) -> HashMap<Position, usize> {
        let mut counts = HashMap::new();
        for player in &self.players {
            *counts.entry(player.position).or_insert(0) += 1;
        }
        counts
    }
}
