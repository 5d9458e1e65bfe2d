//! Error types for the lineup optimizer

use player_pool::PoolError;
use thiserror::Error;

/// Errors returned by `LineupOptimizer::generate`
///
/// An infeasible round is not an error: generation stops early and the
/// lineups accepted so far are returned.
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Solver failure: {0}")]
    Solver(#[from] SolverError),
}

/// Failures of the solver backend itself (never infeasibility)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Solver backend failed: {0}")]
    Backend(String),

    #[error("Solver returned {actual} values for {expected} variables")]
    MalformedAssignment { expected: usize, actual: usize },
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<PoolError> for OptimizerError {
    fn from(err: PoolError) -> Self {
        OptimizerError::InvalidInput(err.to_string())
    }
}

impl From<ConfigError> for OptimizerError {
    fn from(err: ConfigError) -> Self {
        OptimizerError::InvalidInput(err.to_string())
    }
}
