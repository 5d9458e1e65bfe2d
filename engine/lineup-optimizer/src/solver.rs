//! Solver adapters
//!
//! The optimizer only depends on the `LineupSolver` trait; the default
//! adapter hands the program to `good_lp`'s microlp backend.

use crate::error::SolverError;
use crate::model::{Assignment, IntegerProgram, LinearExpr, Relation};
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::debug;

/// Result of a successful solver run
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Proven optimal assignment
    Optimal(Assignment),
    /// No assignment satisfies the constraints
    Infeasible,
}

/// Exact integer optimizer behind the lineup generator
///
/// Implementations must be deterministic for identical programs and must
/// only report proven optima; approximate answers are not accepted.
pub trait LineupSolver {
    fn solve(&self, program: &IntegerProgram) -> Result<SolveOutcome, SolverError>;
}

impl<S: LineupSolver + ?Sized> LineupSolver for &S {
    fn solve(&self, program: &IntegerProgram) -> Result<SolveOutcome, SolverError> {
        (**self).solve(program)
    }
}

impl<S: LineupSolver + ?Sized> LineupSolver for Box<S> {
    fn solve(&self, program: &IntegerProgram) -> Result<SolveOutcome, SolverError> {
        (**self).solve(program)
    }
}

/// Pure-Rust branch-and-bound solver via `good_lp` + microlp
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(handles: &[Variable], expr: &LinearExpr) -> Expression {
    expr.terms().map(|(var, coef)| handles[var] * coef).sum()
}

impl LineupSolver for MicroLpSolver {
    fn solve(&self, program: &IntegerProgram) -> Result<SolveOutcome, SolverError> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = program
            .variables()
            .iter()
            .map(|v| vars.add(variable().binary().name(v.name.clone())))
            .collect();

        let objective = to_expression(&handles, program.objective());
        let mut model = vars.maximise(objective).using(microlp);

        for c in program.constraints() {
            let lhs = to_expression(&handles, &c.lhs);
            let bound = match c.relation {
                Relation::Eq => constraint::eq(lhs, c.rhs),
                Relation::Leq => constraint::leq(lhs, c.rhs),
            };
            model.add_constraint(bound);
        }

        debug!(
            "Solving with microlp: {} variables, {} constraints",
            handles.len(),
            program.constraints().len()
        );

        match model.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|&v| solution.value(v)).collect();
                if values.len() != program.variables().len() {
                    return Err(SolverError::MalformedAssignment {
                        expected: program.variables().len(),
                        actual: values.len(),
                    });
                }
                Ok(SolveOutcome::Optimal(Assignment::new(values)))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
            Err(err) => Err(SolverError::Backend(err.to_string())),
        }
    }
}
