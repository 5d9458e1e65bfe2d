//! Error types for player pools and slate ingestion

use thiserror::Error;

/// Errors that can occur while building or loading a player pool
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Player pool is empty")]
    Empty,

    #[error("Duplicate player ID '{0}' in pool")]
    DuplicateId(String),

    #[error("Failed to read slate file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to fetch slate: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to parse page: {0}")]
    Parse(String),

    #[error("No player data found at {0}")]
    NoData(String),
}
