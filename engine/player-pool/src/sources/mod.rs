//! Slate ingestion: mock data, salary CSV exports and salary web pages

pub mod mock;
pub mod salary_csv;
pub mod web;

use crate::error::PoolError;
use crate::pool::PlayerPool;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where a slate comes from
#[derive(Debug, Clone)]
pub enum SlateSource {
    /// Built-in 13-player mock slate
    Mock,
    /// Local CSV export
    Csv(PathBuf),
    /// Salary page or CSV URL
    Web(String),
}

impl SlateSource {
    /// Load and validate a pool from this source
    pub async fn load(&self) -> Result<PlayerPool, PoolError> {
        let players = match self {
            SlateSource::Mock => mock::players(),
            SlateSource::Csv(path) => salary_csv::parse_csv_file(path)?,
            SlateSource::Web(url) => web::SlateFetcher::new()?.fetch_players_from_page(url).await?,
        };

        info!("Loaded {} players from {:?}", players.len(), self);
        let pool = PlayerPool::new(players)?;
        debug!("Position counts: {:?}", pool.position_counts());
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_mock_source() {
        let pool = SlateSource::Mock.load().await.unwrap();
        assert_eq!(pool.len(), 13);
    }

    #[tokio::test]
    async fn test_empty_csv_source_is_empty_pool() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "Name,Position,Team,Salary,Proj\n").unwrap();

        let result = SlateSource::Csv(file.path().to_path_buf()).load().await;
        assert!(matches!(result, Err(PoolError::Empty)));
    }
}
