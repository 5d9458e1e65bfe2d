use crate::config::OptimizerConfig;
use crate::lineup::{
    Fingerprint, DST_SLOTS, FLEX_SLOTS, QB_SLOTS, RB_BASE, ROSTER_SIZE, TE_BASE, WR_BASE,
};
use crate::model::{IntegerProgram, LinearExpr, Relation, VarId, VarKind};
use player_pool::{PlayerPool, Position};
use tracing::debug;

/// Builds one lineup-selection program per round
///
/// Player selection variables are registered first, so the variable id of
/// a player equals its index in the pool.
pub struct ModelBuilder<'a> {
    pool: &'a PlayerPool,
    config: &'a OptimizerConfig,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(pool: &'a PlayerPool, config: &'a OptimizerConfig) -> Self {
        Self { pool, config }
    }

    /// Build the program for the next lineup given the fingerprints of all
    /// previously accepted lineups
    ///
    /// No feasibility check happens here; a pool that cannot fill a roster
    /// produces a program the solver reports as infeasible.
    pub fn build(&self, prior: &[Fingerprint]) -> IntegerProgram {
        let mut program = IntegerProgram::new();
        let players = self.pool.players();

        let x: Vec<VarId> = players
            .iter()
            .enumerate()
            .map(|(index, p)| program.add_binary(format!("x_{}", p.id), VarKind::Player(index)))
            .collect();

        for (player, &var) in players.iter().zip(&x) {
            program.add_objective_term(var, player.proj);
        }

        let salary = players.iter().zip(&x).fold(LinearExpr::new(), |expr, (p, &var)| {
            expr.with(var, p.salary as f64)
        });
        program.add_constraint("salary_cap", salary, Relation::Leq, self.config.salary_cap as f64);

        self.add_roster_constraints(&mut program, &x);
        self.add_team_constraints(&mut program, &x);
        self.add_diversity_constraints(&mut program, &x, prior);

        debug!(
            "Built program: {} variables, {} constraints, {} prior lineups",
            program.variables().len(),
            program.constraints().len(),
            prior.len()
        );
        program
    }

    fn ids_where(&self, x: &[VarId], pred: impl Fn(&player_pool::Player) -> bool) -> Vec<VarId> {
        self.pool.players().iter().zip(x).filter(|(p, _)| pred(p)).map(|(_, &v)| v).collect()
    }

    fn add_roster_constraints(&self, program: &mut IntegerProgram, x: &[VarId]) {
        let qbs = self.ids_where(x, |p| p.position == Position::QB);
        program.add_constraint("qb_count", LinearExpr::sum_of(qbs), Relation::Eq, QB_SLOTS as f64);

        // DST slot keys off the flag rather than the position label
        let dsts = self.ids_where(x, |p| p.is_dst);
        program.add_constraint(
            "dst_count",
            LinearExpr::sum_of(dsts),
            Relation::Eq,
            DST_SLOTS as f64,
        );

        let flex = [(Position::RB, RB_BASE), (Position::WR, WR_BASE), (Position::TE, TE_BASE)];

        let flex_vars: Vec<VarId> = flex
            .iter()
            .map(|(position, _)| {
                let name = format!("z_flex_{}", position.as_str().to_lowercase());
                program.add_binary(name, VarKind::Flex(*position))
            })
            .collect();
        program.add_constraint(
            "flex_assignment",
            LinearExpr::sum_of(flex_vars.iter().copied()),
            Relation::Eq,
            FLEX_SLOTS as f64,
        );

        // count(position) - z_flex(position) == base
        for ((position, base), &z) in flex.iter().zip(&flex_vars) {
            let mut count = LinearExpr::sum_of(self.ids_where(x, |p| p.position == *position));
            count.add(z, -1.0);
            let name = format!("{}_count", position.as_str().to_lowercase());
            program.add_constraint(name, count, Relation::Eq, *base as f64);
        }

        program.add_constraint(
            "roster_size",
            LinearExpr::sum_of(x.iter().copied()),
            Relation::Eq,
            ROSTER_SIZE as f64,
        );
    }

    fn add_team_constraints(&self, program: &mut IntegerProgram, x: &[VarId]) {
        let stack_penalty = self.config.stack_penalty;

        for team in self.pool.teams() {
            let on_team = |p: &player_pool::Player| p.team == team;

            if let Some(team_max) = self.config.team_max {
                program.add_constraint(
                    format!("team_max_{team}"),
                    LinearExpr::sum_of(self.ids_where(x, on_team)),
                    Relation::Leq,
                    team_max as f64,
                );
            }

            let z_wr = program.add_binary(format!("z_wr_{team}"), VarKind::WrPresent(team.into()));
            let s_stack =
                program.add_binary(format!("s_stack_{team}"), VarKind::UnsupportedQb(team.into()));
            program.add_objective_term(s_stack, -stack_penalty);

            // z_wr = OR(selected WRs on team)
            let wrs = self.ids_where(x, |p| on_team(p) && p.position == Position::WR);
            if wrs.is_empty() {
                program.add_constraint(
                    format!("wr_present_off_{team}"),
                    LinearExpr::sum_of([z_wr]),
                    Relation::Eq,
                    0.0,
                );
            } else {
                for &wr in &wrs {
                    // x_wr <= z_wr
                    program.add_constraint(
                        format!("wr_present_lb_{team}_{wr}"),
                        LinearExpr::new().with(wr, 1.0).with(z_wr, -1.0),
                        Relation::Leq,
                        0.0,
                    );
                }
                // z_wr <= sum(x_wr)
                let mut upper = LinearExpr::sum_of([z_wr]);
                for &wr in &wrs {
                    upper.add(wr, -1.0);
                }
                program.add_constraint(format!("wr_present_ub_{team}"), upper, Relation::Leq, 0.0);
            }

            // s_stack >= qb - z_wr, s_stack <= qb, s_stack <= 1
            let qbs = self.ids_where(x, |p| on_team(p) && p.position == Position::QB);
            if qbs.is_empty() {
                program.add_constraint(
                    format!("unsupported_qb_off_{team}"),
                    LinearExpr::sum_of([s_stack]),
                    Relation::Eq,
                    0.0,
                );
            } else {
                let mut lower = LinearExpr::sum_of(qbs.iter().copied());
                lower.add(z_wr, -1.0).add(s_stack, -1.0);
                program.add_constraint(
                    format!("unsupported_qb_lb_{team}"),
                    lower,
                    Relation::Leq,
                    0.0,
                );

                let mut upper = LinearExpr::sum_of([s_stack]);
                for &qb in &qbs {
                    upper.add(qb, -1.0);
                }
                program.add_constraint(
                    format!("unsupported_qb_ub_{team}"),
                    upper,
                    Relation::Leq,
                    0.0,
                );
                program.add_constraint(
                    format!("unsupported_qb_cap_{team}"),
                    LinearExpr::sum_of([s_stack]),
                    Relation::Leq,
                    1.0,
                );
            }
        }
    }

    fn add_diversity_constraints(
        &self,
        program: &mut IntegerProgram,
        x: &[VarId],
        prior: &[Fingerprint],
    ) {
        let overlap_with = |fingerprint: &Fingerprint| {
            LinearExpr::sum_of(self.ids_where(x, |p| fingerprint.contains(&p.id)))
        };

        for (k, fingerprint) in prior.iter().enumerate() {
            program.add_constraint(
                format!("exclude_{k}"),
                overlap_with(fingerprint),
                Relation::Leq,
                (ROSTER_SIZE - 1) as f64,
            );
        }

        if let Some(overlap_max) = self.config.overlap_max {
            for (k, fingerprint) in prior.iter().enumerate() {
                program.add_constraint(
                    format!("overlap_{k}"),
                    overlap_with(fingerprint),
                    Relation::Leq,
                    overlap_max as f64,
                );
            }
        }

        // One aggregate bound on total overlap, not a per-lineup bound
        if let Some(avg_overlap_max) = self.config.avg_overlap_max {
            if !prior.is_empty() {
                let mut total = LinearExpr::new();
                for fingerprint in prior {
                    for (var, coef) in overlap_with(fingerprint).terms() {
                        total.add(var, coef);
                    }
                }
                program.add_constraint(
                    "avg_overlap",
                    total,
                    Relation::Leq,
                    avg_overlap_max * prior.len() as f64,
                );
            }
        }
    }
}
