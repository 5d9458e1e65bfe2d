//! Lineup CLI
//!
//! Loads a slate (mock, salary CSV or salary web page), merges the optimizer
//! configuration from defaults, a TOML file, `LINEUP_*` environment
//! variables, a strategy preset and explicit flags, then prints the
//! generated lineups as text or JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use lineup_optimizer::{metrics, Lineup, LineupOptimizer, OptimizerConfig, Preset};
use player_pool::sources::web::FFTOOLBOX_URL;
use player_pool::SlateSource;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lineup-cli")]
#[command(about = "Generate distinct DraftKings Classic NFL lineups")]
#[command(version = "0.1.0")]
struct Cli {
    /// Where to load the player slate from
    #[arg(long, value_enum, default_value = "mock")]
    source: SourceKind,

    /// Salary CSV export (required with --source csv)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Salary page or CSV URL (defaults to the FFToolbox DraftKings page)
    #[arg(long)]
    url: Option<String>,

    /// Number of lineups to generate
    #[arg(short, long)]
    count: Option<usize>,

    #[arg(long)]
    salary_cap: Option<u32>,

    /// Maximum players shared with any earlier lineup
    #[arg(long)]
    overlap_max: Option<u32>,

    /// Maximum players from one NFL team
    #[arg(long)]
    team_max: Option<u32>,

    /// Accepted for compatibility; stacking is controlled by --stack-penalty
    #[arg(long)]
    prefer_qb_wr_stack: bool,

    /// Points subtracted per QB without a same-team WR
    #[arg(long)]
    stack_penalty: Option<f64>,

    /// Maximum average overlap with earlier lineups
    #[arg(long)]
    avg_overlap_max: Option<f64>,

    /// Strategy preset: default, heavy-stacking, contrarian or cash
    #[arg(long)]
    preset: Option<String>,

    /// TOML file with optimizer settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    Mock,
    Csv,
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct LineupReport<'a> {
    index: usize,
    projection: f64,
    salary: u32,
    players: Vec<&'a player_pool::Player>,
}

impl Cli {
    fn slate_source(&self) -> Result<SlateSource> {
        match self.source {
            SourceKind::Mock => Ok(SlateSource::Mock),
            SourceKind::Csv => {
                let path = self.file.clone().context("--source csv requires --file <path>")?;
                Ok(SlateSource::Csv(path))
            }
            SourceKind::Web => {
                Ok(SlateSource::Web(self.url.clone().unwrap_or_else(|| FFTOOLBOX_URL.to_string())))
            }
        }
    }

    /// defaults -> TOML -> environment -> preset -> flags
    fn build_config<F>(&self, env_lookup: F) -> Result<OptimizerConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => OptimizerConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => OptimizerConfig::default(),
        };

        config.apply_env_with(env_lookup);

        if let Some(name) = &self.preset {
            let preset: Preset = name.parse().context("Unknown preset")?;
            preset.apply(&mut config);
        }

        if let Some(count) = self.count {
            config.lineup_count = count;
        }
        if let Some(cap) = self.salary_cap {
            config.salary_cap = cap;
        }
        if let Some(overlap) = self.overlap_max {
            config.overlap_max = Some(overlap);
        }
        if let Some(team_max) = self.team_max {
            config.team_max = Some(team_max);
        }
        if self.prefer_qb_wr_stack {
            config.prefer_qb_wr_stack = true;
        }
        if let Some(penalty) = self.stack_penalty {
            config.stack_penalty = penalty;
        }
        if let Some(avg) = self.avg_overlap_max {
            config.avg_overlap_max = Some(avg);
        }

        config.validate().context("Invalid optimizer configuration")?;
        Ok(config)
    }
}

fn render_text(lineups: &[Lineup]) -> String {
    let mut out = String::new();
    for (i, lineup) in lineups.iter().enumerate() {
        out.push_str(&format!(
            "\nLineup {}: proj={:.2} salary={}\n",
            i + 1,
            metrics::projection(lineup),
            metrics::salary(lineup)
        ));
        for p in lineup.players_by_slot() {
            out.push_str(&format!(
                "  {} - {} ({}) ${} proj:{}\n",
                p.position, p.name, p.team, p.salary, p.proj
            ));
        }
    }
    out
}

fn render_json(lineups: &[Lineup]) -> Result<String> {
    let reports: Vec<LineupReport> = lineups
        .iter()
        .enumerate()
        .map(|(i, lineup)| LineupReport {
            index: i + 1,
            projection: metrics::projection(lineup),
            salary: metrics::salary(lineup),
            players: lineup.players_by_slot(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.build_config(|key| std::env::var(key).ok())?;

    let source = cli.slate_source()?;
    let pool = source.load().await.with_context(|| format!("Failed to load slate from {:?}", source))?;
    info!("Slate has {} players across {} teams", pool.len(), pool.teams().len());

    let generated = LineupOptimizer::new()
        .generate_from_pool(&pool, &config)
        .context("Lineup generation failed")?;

    if generated.len() < config.lineup_count {
        let warning = format!(
            "Only {} of {} lineups could be generated ({:?})",
            generated.len(),
            config.lineup_count,
            generated.stop_reason()
        );
        eprintln!("{}", warning.as_str().yellow());
    }

    match cli.format {
        OutputFormat::Text => {
            let header = format!("Generated {} lineups", generated.len());
            println!("{}", header.as_str().green().bold());
            print!("{}", render_text(generated.lineups()));
        }
        OutputFormat::Json => println!("{}", render_json(generated.lineups())?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_pool::{Player, Position};
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lineup-cli").chain(args.iter().copied())).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.source, SourceKind::Mock);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.build_config(no_env).unwrap(), OptimizerConfig::default());
    }

    #[test]
    fn test_flags_override_preset() {
        let cli = parse(&["--preset", "contrarian", "--team-max", "3"]);
        let config = cli.build_config(no_env).unwrap();

        assert_eq!(config.team_max, Some(3));
        assert_eq!(config.overlap_max, Some(3));
        assert_eq!(config.stack_penalty, 5.0);
    }

    #[test]
    fn test_preset_overrides_env_and_env_overrides_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "lineup_count = 7\nstack_penalty = 2.0\n").unwrap();
        let path = file.path().to_str().unwrap();

        let env: HashMap<&str, &str> =
            [("LINEUP_COUNT", "9"), ("LINEUP_STACK_PENALTY", "3.0")].into_iter().collect();
        let cli = parse(&["--config", path, "--preset", "cash"]);
        let config = cli.build_config(|key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.lineup_count, 9);
        assert_eq!(config.stack_penalty, 1.0);
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let cli = parse(&["--preset", "yolo"]);
        assert!(cli.build_config(no_env).is_err());
    }

    #[test]
    fn test_csv_source_requires_file() {
        let cli = parse(&["--source", "csv"]);
        assert!(cli.slate_source().is_err());

        let cli = parse(&["--source", "csv", "--file", "slate.csv"]);
        assert!(matches!(cli.slate_source().unwrap(), SlateSource::Csv(_)));
    }

    #[test]
    fn test_web_source_defaults_to_fftoolbox() {
        let cli = parse(&["--source", "web"]);
        match cli.slate_source().unwrap() {
            SlateSource::Web(url) => assert_eq!(url, FFTOOLBOX_URL),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_render_text_format() {
        let lineup = Lineup::new([
            Player::new("WR1", "Receiver", Position::WR, "GB", 17.0, 6800),
            Player::new("DST1", "Defense", Position::DST, "NE", 7.0, 3000),
            Player::new("QB1", "Passer", Position::QB, "NE", 22.5, 6500),
        ]);
        let text = render_text(&[lineup]);

        assert!(text.contains("Lineup 1: proj=46.50 salary=16300"));
        // Roster slot order, defense last
        let qb = text.find("QB - Passer (NE) $6500 proj:22.5").unwrap();
        let wr = text.find("WR - Receiver (GB) $6800 proj:17").unwrap();
        let dst = text.find("DST - Defense (NE) $3000 proj:7").unwrap();
        assert!(qb < wr && wr < dst);
    }

    #[test]
    fn test_render_json() {
        let lineup = Lineup::new([Player::new("QB1", "Passer", Position::QB, "NE", 22.5, 6500)]);
        let json: serde_json::Value = serde_json::from_str(&render_json(&[lineup]).unwrap()).unwrap();

        assert_eq!(json[0]["index"], 1);
        assert_eq!(json[0]["salary"], 6500);
        assert_eq!(json[0]["players"][0]["id"], "QB1");
    }
}
