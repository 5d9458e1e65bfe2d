//! Configuration for the lineup optimizer

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// DraftKings Classic salary cap
pub const DK_SALARY_CAP: u32 = 50_000;

/// Default number of lineups to generate
pub const DEFAULT_LINEUP_COUNT: usize = 5;

/// Default maximum players from one NFL team
pub const DEFAULT_TEAM_MAX: u32 = 3;

/// Configuration for one `generate` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Salary cap in dollars (default: 50000)
    pub salary_cap: u32,

    /// Number of lineups N to generate
    pub lineup_count: usize,

    /// Maximum players shared with any previously generated lineup
    pub overlap_max: Option<u32>,

    /// Maximum players from a single NFL team
    pub team_max: Option<u32>,

    /// Points subtracted per selected QB without a same-team WR (0 disables)
    pub stack_penalty: f64,

    /// Maximum average overlap with the previously generated lineups
    pub avg_overlap_max: Option<f64>,

    /// Accepted for compatibility; stacking is driven by `stack_penalty` only
    pub prefer_qb_wr_stack: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            salary_cap: DK_SALARY_CAP,
            lineup_count: DEFAULT_LINEUP_COUNT,
            overlap_max: None,
            team_max: Some(DEFAULT_TEAM_MAX),
            stack_penalty: 0.0,
            avg_overlap_max: None,
            prefer_qb_wr_stack: false,
        }
    }
}

impl OptimizerConfig {
    /// Parse configuration from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        info!("Loading optimizer config from: {:?}", path.as_ref());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load defaults overridden by environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `LINEUP_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Unparsable values are ignored with a warning.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(cap) = parse_var(&lookup, "LINEUP_SALARY_CAP") {
            self.salary_cap = cap;
        }

        if let Some(count) = parse_var(&lookup, "LINEUP_COUNT") {
            self.lineup_count = count;
        }

        if let Some(overlap) = parse_var(&lookup, "LINEUP_OVERLAP_MAX") {
            self.overlap_max = Some(overlap);
        }

        if let Some(team_max) = parse_var(&lookup, "LINEUP_TEAM_MAX") {
            self.team_max = Some(team_max);
        }

        if let Some(penalty) = parse_var(&lookup, "LINEUP_STACK_PENALTY") {
            self.stack_penalty = penalty;
        }

        if let Some(avg) = parse_var(&lookup, "LINEUP_AVG_OVERLAP_MAX") {
            self.avg_overlap_max = Some(avg);
        }
    }

    /// Check the values a model can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lineup_count == 0 {
            return Err(ConfigError::Invalid("lineup_count must be at least 1".to_string()));
        }

        if self.team_max == Some(0) {
            return Err(ConfigError::Invalid("team_max must be at least 1".to_string()));
        }

        if !self.stack_penalty.is_finite() || self.stack_penalty < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stack_penalty must be a non-negative number, got {}",
                self.stack_penalty
            )));
        }

        if let Some(avg) = self.avg_overlap_max {
            if !avg.is_finite() || avg < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "avg_overlap_max must be a non-negative number, got {avg}"
                )));
            }
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}

/// Named strategy presets applied on top of a loaded config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Default,
    HeavyStacking,
    Contrarian,
    Cash,
}

impl Preset {
    /// Overwrite the fields this preset controls
    pub fn apply(&self, config: &mut OptimizerConfig) {
        match self {
            Preset::Default => {}
            Preset::HeavyStacking => {
                config.prefer_qb_wr_stack = true;
                config.team_max = Some(4);
                config.stack_penalty = 0.0;
            }
            Preset::Contrarian => {
                config.overlap_max = Some(3);
                config.team_max = Some(2);
                config.stack_penalty = 5.0;
            }
            Preset::Cash => {
                config.overlap_max = Some(5);
                config.team_max = Some(3);
                config.stack_penalty = 1.0;
            }
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Preset::Default),
            "heavy_stacking" => Ok(Preset::HeavyStacking),
            "contrarian" => Ok(Preset::Contrarian),
            "cash" => Ok(Preset::Cash),
            other => Err(ConfigError::Invalid(format!("unknown preset '{other}'"))),
        }
    }
}
