//! Solver-independent integer program
//!
//! The model builder emits this representation and solver adapters
//! translate it into their own problem types. All variables are binary;
//! every constraint is normalized to `Σ coef·var (= | ≤) rhs`.

use player_pool::Position;
use std::collections::BTreeMap;
use std::fmt;

/// Index of a variable within an `IntegerProgram`
pub type VarId = usize;

/// What a binary variable stands for
#[derive(Debug, Clone, PartialEq)]
pub enum VarKind {
    /// Player selection; carries the player's index in the pool
    Player(usize),
    /// At least one WR from this team is selected
    WrPresent(String),
    /// A QB from this team is selected without a same-team WR
    UnsupportedQb(String),
    /// The flex slot is filled by this position
    Flex(Position),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Leq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Eq => f.write_str("="),
            Relation::Leq => f.write_str("<="),
        }
    }
}

/// Sparse linear expression with coefficients merged per variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: BTreeMap<VarId, f64>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the given variables, each with coefficient 1
    pub fn sum_of(vars: impl IntoIterator<Item = VarId>) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add(var, 1.0);
        }
        expr
    }

    pub fn add(&mut self, var: VarId, coef: f64) -> &mut Self {
        *self.terms.entry(var).or_insert(0.0) += coef;
        self
    }

    pub fn with(mut self, var: VarId, coef: f64) -> Self {
        self.add(var, coef);
        self
    }

    pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.terms.iter().map(|(&var, &coef)| (var, coef))
    }

    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms.get(&var).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Drop every term whose variable fails the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(VarId) -> bool) {
        self.terms.retain(|&var, _| keep(var));
    }

    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms().map(|(var, coef)| coef * assignment.value(var)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub lhs: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        const TOLERANCE: f64 = 1e-6;
        let value = self.lhs.evaluate(assignment);
        match self.relation {
            Relation::Eq => (value - self.rhs).abs() <= TOLERANCE,
            Relation::Leq => value <= self.rhs + TOLERANCE,
        }
    }
}

/// Values a solver assigned to each variable, indexed by `VarId`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Raw value; unknown variables read as 0
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var).copied().unwrap_or(0.0)
    }

    /// Binary reading of a solver value
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Binary maximization problem
#[derive(Debug, Clone, Default)]
pub struct IntegerProgram {
    variables: Vec<Variable>,
    objective: LinearExpr,
    constraints: Vec<LinearConstraint>,
}

impl IntegerProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binary variable and return its id
    pub fn add_binary(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        self.variables.push(Variable { name: name.into(), kind });
        self.variables.len() - 1
    }

    pub fn add_objective_term(&mut self, var: VarId, coef: f64) {
        self.objective.add(var, coef);
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        lhs: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint { name: name.into(), lhs, relation, rhs });
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn objective_mut(&mut self) -> &mut LinearExpr {
        &mut self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Keep only the constraints matching the predicate
    pub fn retain_constraints(&mut self, keep: impl FnMut(&LinearConstraint) -> bool) {
        self.constraints.retain(keep);
    }

    /// Variable ids matching a predicate on their kind
    pub fn vars_where(&self, mut pred: impl FnMut(&VarKind) -> bool) -> Vec<VarId> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, v)| pred(&v.kind))
            .map(|(id, _)| id)
            .collect()
    }

    /// Pool indices of the players an assignment selects, in pool order
    pub fn selected_players(&self, assignment: &Assignment) -> Vec<usize> {
        self.variables
            .iter()
            .enumerate()
            .filter_map(|(id, v)| match v.kind {
                VarKind::Player(index) if assignment.is_set(id) => Some(index),
                _ => None,
            })
            .collect()
    }

    pub fn objective_value(&self, assignment: &Assignment) -> f64 {
        self.objective.evaluate(assignment)
    }

    /// Names of the constraints an assignment violates
    pub fn violated_constraints(&self, assignment: &Assignment) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(assignment))
            .map(|c| c.name.as_str())
            .collect()
    }
}
