use crate::config::OptimizerConfig;
use crate::controller::{DiversificationController, GeneratedSet};
use crate::error::OptimizerError;
use crate::lineup::Lineup;
use crate::solver::{LineupSolver, MicroLpSolver};
use player_pool::{Player, PlayerPool};
use tracing::{debug, info};

/// Top-level entry point for lineup generation
pub struct LineupOptimizer<S: LineupSolver = MicroLpSolver> {
    solver: S,
}

impl LineupOptimizer<MicroLpSolver> {
    /// Create an optimizer backed by the microlp solver
    pub fn new() -> Self {
        Self { solver: MicroLpSolver }
    }
}

impl Default for LineupOptimizer<MicroLpSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LineupSolver> LineupOptimizer<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Generate up to `config.lineup_count` distinct lineups
    ///
    /// Fails with `InvalidInput` on an empty pool, duplicate player IDs or
    /// an invalid configuration before any model is built. A short (or
    /// empty) result means a round was infeasible.
    pub fn generate(
        &self,
        players: &[Player],
        config: &OptimizerConfig,
    ) -> Result<Vec<Lineup>, OptimizerError> {
        if players.is_empty() {
            return Err(OptimizerError::InvalidInput("no players provided".to_string()));
        }
        let pool = PlayerPool::new(players.to_vec())?;

        Ok(self.generate_from_pool(&pool, config)?.into_lineups())
    }

    /// Generate lineups from an already validated pool
    pub fn generate_from_pool(
        &self,
        pool: &PlayerPool,
        config: &OptimizerConfig,
    ) -> Result<GeneratedSet, OptimizerError> {
        config.validate()?;

        if config.prefer_qb_wr_stack {
            debug!("prefer_qb_wr_stack is set; stacking is controlled by stack_penalty only");
        }

        info!(
            "Generating {} lineups from {} players (cap {}, team_max {:?}, overlap_max {:?})",
            config.lineup_count,
            pool.len(),
            config.salary_cap,
            config.team_max,
            config.overlap_max
        );

        let generated = DiversificationController::new(pool, config, &self.solver).run()?;

        info!("Generated {} of {} lineups ({:?})", generated.len(), config.lineup_count, generated.stop_reason());
        Ok(generated)
    }
}

/// Generate lineups with the default solver
pub fn generate_lineups(
    players: &[Player],
    config: &OptimizerConfig,
) -> Result<Vec<Lineup>, OptimizerError> {
    LineupOptimizer::new().generate(players, config)
}
