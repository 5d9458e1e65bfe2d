//! Aggregate metrics over lineups

use crate::lineup::Lineup;
use std::collections::BTreeMap;

/// Total salary of a lineup
pub fn salary(lineup: &Lineup) -> u32 {
    lineup.players().map(|p| p.salary).sum()
}

/// Total projected points of a lineup
pub fn projection(lineup: &Lineup) -> f64 {
    lineup.players().map(|p| p.proj).sum()
}

/// Number of players two lineups share
pub fn overlap(a: &Lineup, b: &Lineup) -> usize {
    a.ids().filter(|id| b.contains(id)).count()
}

/// Players per team; team-less players are not counted
pub fn team_exposure(lineup: &Lineup) -> BTreeMap<&str, usize> {
    let mut exposure = BTreeMap::new();
    for player in lineup.players().filter(|p| !p.team.is_empty()) {
        *exposure.entry(player.team.as_str()).or_insert(0) += 1;
    }
    exposure
}
