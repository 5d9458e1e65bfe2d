use crate::builder::ModelBuilder;
use crate::config::OptimizerConfig;
use crate::error::SolverError;
use crate::lineup::{Fingerprint, Lineup};
use crate::metrics;
use crate::solver::{LineupSolver, SolveOutcome};
use player_pool::PlayerPool;
use tracing::{debug, info};

/// Why generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All requested lineups were generated
    Completed,
    /// The solver proved round `round` infeasible
    Infeasible { round: usize },
    /// The solver returned an assignment selecting no players
    EmptySelection { round: usize },
}

/// Lineups accepted so far, with the fingerprints used for later cuts
#[derive(Debug, Clone)]
pub struct GeneratedSet {
    lineups: Vec<Lineup>,
    fingerprints: Vec<Fingerprint>,
    stop_reason: StopReason,
}

impl GeneratedSet {
    fn new() -> Self {
        Self { lineups: Vec::new(), fingerprints: Vec::new(), stop_reason: StopReason::Completed }
    }

    fn accept(&mut self, lineup: Lineup) {
        self.fingerprints.push(lineup.fingerprint());
        self.lineups.push(lineup);
    }

    pub fn lineups(&self) -> &[Lineup] {
        &self.lineups
    }

    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    pub fn into_lineups(self) -> Vec<Lineup> {
        self.lineups
    }
}

/// Drives up to N sequential solves, cutting off every accepted lineup
///
/// Each lineup is optimal only with respect to the cuts accumulated before
/// its round. The first infeasible round ends generation; there is no
/// relaxation or retry.
pub struct DiversificationController<'a, S: LineupSolver> {
    pool: &'a PlayerPool,
    config: &'a OptimizerConfig,
    solver: &'a S,
    generated: GeneratedSet,
}

impl<'a, S: LineupSolver> DiversificationController<'a, S> {
    pub fn new(pool: &'a PlayerPool, config: &'a OptimizerConfig, solver: &'a S) -> Self {
        Self { pool, config, solver, generated: GeneratedSet::new() }
    }

    /// Run all rounds and hand over the accepted lineups
    pub fn run(mut self) -> Result<GeneratedSet, SolverError> {
        let builder = ModelBuilder::new(self.pool, self.config);

        for round in 0..self.config.lineup_count {
            let program = builder.build(self.generated.fingerprints());

            let assignment = match self.solver.solve(&program)? {
                SolveOutcome::Optimal(assignment) => assignment,
                SolveOutcome::Infeasible => {
                    info!("Round {} infeasible, stopping with {} lineups", round, self.generated.len());
                    self.generated.stop_reason = StopReason::Infeasible { round };
                    break;
                }
            };

            let selected = program.selected_players(&assignment);
            if selected.is_empty() {
                info!("Round {} selected no players, stopping", round);
                self.generated.stop_reason = StopReason::EmptySelection { round };
                break;
            }

            let players = self.pool.players();
            let lineup = Lineup::new(selected.into_iter().map(|index| players[index].clone()));

            debug!(
                "Round {}: objective {:.2}, proj {:.2}, salary {}",
                round,
                program.objective_value(&assignment),
                metrics::projection(&lineup),
                metrics::salary(&lineup)
            );
            self.generated.accept(lineup);
        }

        Ok(self.generated)
    }
}
