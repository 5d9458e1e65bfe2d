//! DraftKings / FFToolbox salary CSV parsing

use crate::error::PoolError;
use crate::types::{Player, Position};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

const NAME_COLUMNS: &[&str] = &["player", "name"];
const SALARY_COLUMNS: &[&str] = &["dk salary", "salary", "dk_salary", "salary ($)"];
const POSITION_COLUMNS: &[&str] = &["pos", "position"];
const TEAM_COLUMNS: &[&str] = &["team", "tm"];
const PROJECTION_COLUMNS: &[&str] = &["fpts", "proj", "projection"];
const OPPONENT_COLUMNS: &[&str] = &["opp", "opponent"];

/// Column positions resolved from the header row
struct ColumnMap {
    name: Option<usize>,
    salary: Option<usize>,
    position: Option<usize>,
    team: Option<usize>,
    projection: Option<usize>,
    opponent: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |aliases: &[&str]| {
            aliases.iter().find_map(|alias| normalized.iter().position(|h| h == alias))
        };

        Self {
            name: find(NAME_COLUMNS),
            salary: find(SALARY_COLUMNS),
            position: find(POSITION_COLUMNS),
            team: find(TEAM_COLUMNS),
            projection: find(PROJECTION_COLUMNS),
            opponent: find(OPPONENT_COLUMNS),
        }
    }

    fn get<'r>(&self, record: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
        column.and_then(|index| record.get(index)).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Collapse runs of whitespace in a player name
fn clean_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep only the digits of a salary cell ("$7,400" -> 7400)
fn parse_salary(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Keep digits and dots of a projection cell ("18.4 pts" -> 18.4)
fn parse_projection(raw: &str) -> f64 {
    let number: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    number.parse().unwrap_or(0.0)
}

/// Build the stable player ID used for CSV imports
pub fn player_id(team: &str, name: &str) -> String {
    format!("FT_{}_{}", team, name.replace(' ', "_"))
}

/// Parse CSV text into players
///
/// Rows without a name or with a position outside the Classic roster are
/// skipped. Later rows that collide on player ID are dropped so the result
/// can always form a pool.
pub fn parse_csv_str(csv_text: &str) -> Result<Vec<Player>, PoolError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(csv_text.as_bytes());
    let columns = ColumnMap::from_headers(reader.headers()?);

    let mut players = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;

        let Some(name) = columns.get(&record, columns.name).map(clean_name) else {
            skipped += 1;
            continue;
        };

        let position_label = columns.get(&record, columns.position).unwrap_or_default();
        let position = match position_label.parse::<Position>() {
            Ok(position) => position,
            Err(err) => {
                debug!("Skipping {}: {}", name, err);
                skipped += 1;
                continue;
            }
        };

        let team = columns.get(&record, columns.team).unwrap_or_default().to_uppercase();
        let salary = columns.get(&record, columns.salary).map(parse_salary).unwrap_or(0);
        let proj = columns.get(&record, columns.projection).map(parse_projection).unwrap_or(0.0);

        let mut player = Player::new(player_id(&team, &name), name, position, team, proj, salary);
        player.opponent = columns.get(&record, columns.opponent).map(str::to_uppercase);

        if !seen_ids.insert(player.id.clone()) {
            warn!("Dropping duplicate player row: {}", player.id);
            skipped += 1;
            continue;
        }

        players.push(player);
    }

    info!("Parsed {} players from CSV ({} rows skipped)", players.len(), skipped);
    Ok(players)
}

/// Parse a local CSV file (e.g., a downloaded FFToolbox export)
pub fn parse_csv_file<P: AsRef<Path>>(file_path: P) -> Result<Vec<Player>, PoolError> {
    info!("Reading salary CSV from: {:?}", file_path.as_ref());
    let csv_text = std::fs::read_to_string(file_path)?;
    parse_csv_str(&csv_text)
}
