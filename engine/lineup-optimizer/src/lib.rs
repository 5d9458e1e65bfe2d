//! Lineup Optimizer
//!
//! Generates N distinct, salary-capped DraftKings Classic lineups. Each
//! lineup comes from one integer program (roster shape, salary cap, team
//! exposure, soft QB/WR stacking penalty); after every solve the accepted
//! lineup is cut off so the next solve must differ.

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod lineup;
pub mod metrics;
pub mod model;
pub mod optimizer;
pub mod solver;

#[cfg(test)]
mod integration_tests;

pub use builder::ModelBuilder;
pub use config::{OptimizerConfig, Preset, DK_SALARY_CAP};
pub use controller::{DiversificationController, GeneratedSet, StopReason};
pub use error::{ConfigError, OptimizerError, SolverError};
pub use lineup::{Fingerprint, Lineup, ROSTER_SIZE};
pub use model::{Assignment, IntegerProgram};
pub use optimizer::{generate_lineups, LineupOptimizer};
pub use solver::{LineupSolver, MicroLpSolver, SolveOutcome};

pub use player_pool::{Player, PlayerPool, Position};
