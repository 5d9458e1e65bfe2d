//! Best-effort slate fetching from FFToolbox-style salary pages

use crate::error::PoolError;
use crate::sources::salary_csv::parse_csv_str;
use crate::types::Player;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

/// Default FFToolbox DraftKings page
pub const FFTOOLBOX_URL: &str =
    "https://fftoolbox.fulltimefantasy.com/football/draftkings-fulltimefantasy-scores.php";

/// What a salary page offered us
#[derive(Debug, PartialEq)]
pub enum PageContent {
    /// The page links to a CSV export
    CsvLink(Url),
    /// Players parsed straight from an HTML table
    Players(Vec<Player>),
}

/// HTTP fetcher for salary pages and CSV exports
pub struct SlateFetcher {
    client: Client,
}

impl SlateFetcher {
    /// Create a new slate fetcher
    pub fn new() -> Result<Self, PoolError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .build()?;

        Ok(Self { client })
    }

    /// Fetch players from a salary page or a direct CSV URL
    ///
    /// Prefers a linked CSV export; falls back to the first HTML table that
    /// has both a salary and a player/name column.
    pub async fn fetch_players_from_page(&self, url: &str) -> Result<Vec<Player>, PoolError> {
        let url = Url::parse(url).map_err(|e| PoolError::Parse(format!("invalid URL {url}: {e}")))?;

        if url.path().to_lowercase().ends_with(".csv") {
            return self.fetch_csv(url).await;
        }

        info!("Fetching salary page: {}", url);
        let html = self.fetch_text(url.clone()).await?;
        info!("Successfully fetched HTML ({} bytes)", html.len());

        match parse_page(&html, &url)? {
            PageContent::CsvLink(csv_url) => {
                let players = self.fetch_csv(csv_url.clone()).await?;
                if players.is_empty() {
                    warn!("Linked CSV {} had no players", csv_url);
                    return Err(PoolError::NoData(csv_url.to_string()));
                }
                Ok(players)
            }
            PageContent::Players(players) if !players.is_empty() => Ok(players),
            PageContent::Players(_) => Err(PoolError::NoData(url.to_string())),
        }
    }

    async fn fetch_csv(&self, url: Url) -> Result<Vec<Player>, PoolError> {
        info!("Fetching salary CSV: {}", url);
        let csv_text = self.fetch_text(url).await?;
        parse_csv_str(&csv_text)
    }

    async fn fetch_text(&self, url: Url) -> Result<String, PoolError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

fn selector(css: &str) -> Result<Selector, PoolError> {
    Selector::parse(css).map_err(|e| PoolError::Parse(format!("bad selector {css}: {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Inspect a fetched page for a CSV link, then for a salary table
pub fn parse_page(html: &str, base_url: &Url) -> Result<PageContent, PoolError> {
    let document = Html::parse_document(html);

    let link_selector = selector("a[href]")?;
    for link in document.select(&link_selector) {
        let Some(href) = link.value().attr("href") else { continue };
        let lower = href.to_lowercase();
        if lower.contains(".csv") || lower.contains("download") {
            match base_url.join(href) {
                Ok(csv_url) => return Ok(PageContent::CsvLink(csv_url)),
                Err(e) => warn!("Ignoring unusable CSV link {}: {}", href, e),
            }
        }
    }

    parse_salary_tables(&document).map(PageContent::Players)
}

/// Convert the first salary table into players via the CSV parser
fn parse_salary_tables(document: &Html) -> Result<Vec<Player>, PoolError> {
    let table_selector = selector("table")?;
    let header_selector = selector("th")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;

    for table in document.select(&table_selector) {
        let headers: Vec<String> =
            table.select(&header_selector).map(|th| cell_text(th).to_lowercase()).collect();
        let has_salary = headers.iter().any(|h| h.contains("salary"));
        let has_name = headers.iter().any(|h| h.contains("player") || h.contains("name"));
        if !has_salary || !has_name {
            continue;
        }

        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for row in table.select(&row_selector) {
            let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
            if !cells.is_empty() {
                writer.write_record(&cells)?;
            }
        }
        let bytes = writer.into_inner().map_err(|e| PoolError::Parse(e.to_string()))?;
        let csv_text = String::from_utf8_lossy(&bytes);

        let players = parse_csv_str(&csv_text)?;
        if !players.is_empty() {
            return Ok(players);
        }
    }

    Ok(Vec::new())
}
