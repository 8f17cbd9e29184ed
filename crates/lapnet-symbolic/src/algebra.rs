//! The symbolic-algebra capability used by the circuit solver.

use indexmap::IndexMap;

use crate::error::Result;
use crate::expr::{Equation, Symbol};
use crate::inverse::{TimeExpr, inverse_laplace};
use crate::linear::solve_linear_system;
use crate::rational::Rational;

/// Numerical tolerances for the rational-function engine.
///
/// All values are relative to the magnitude of the quantities compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Distance at which a numerator root cancels a denominator root.
    pub root_match: f64,
    /// Distance at which denominator roots merge into one repeated pole.
    pub pole_cluster: f64,
    /// Imaginary part below which a pole is treated as real.
    pub imaginary: f64,
    /// Fraction of the largest term below which an inverse term is dropped.
    pub negligible: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            root_match: 1e-6,
            pole_cluster: 1e-5,
            imaginary: 1e-9,
            negligible: 1e-10,
        }
    }
}

impl Tolerances {
    /// Set the root cancellation tolerance.
    pub fn with_root_match(mut self, tol: f64) -> Self {
        self.root_match = tol;
        self
    }

    /// Set the repeated-pole clustering tolerance.
    pub fn with_pole_cluster(mut self, tol: f64) -> Self {
        self.pole_cluster = tol;
        self
    }

    /// Set the real-pole detection tolerance.
    pub fn with_imaginary(mut self, tol: f64) -> Self {
        self.imaginary = tol;
        self
    }

    /// Set the negligible-term threshold.
    pub fn with_negligible(mut self, tol: f64) -> Self {
        self.negligible = tol;
        self
    }
}

/// Solve, invert and evaluate transform-domain expressions.
///
/// The circuit solver only talks to this trait, so another engine can be
/// swapped in without touching equation assembly.
pub trait SymbolicAlgebra {
    /// Solve `equations` for `unknowns`, returning one expression per unknown
    /// in the order given.
    fn solve_linear_system(
        &self,
        equations: &[Equation],
        unknowns: &[Symbol],
    ) -> Result<IndexMap<Symbol, Rational>>;

    /// Convert a transform-domain expression into a time-domain expression.
    fn invert_transform(&self, expression: &Rational) -> Result<TimeExpr>;

    /// Evaluate a time-domain expression at each point.
    fn evaluate_numeric(&self, expression: &TimeExpr, points: &[f64]) -> Vec<f64>;
}

/// Default [`SymbolicAlgebra`] over real-coefficient rational functions.
#[derive(Debug, Clone, Default)]
pub struct RationalAlgebra {
    tolerances: Tolerances,
}

impl RationalAlgebra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom tolerances.
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }
}

impl SymbolicAlgebra for RationalAlgebra {
    fn solve_linear_system(
        &self,
        equations: &[Equation],
        unknowns: &[Symbol],
    ) -> Result<IndexMap<Symbol, Rational>> {
        solve_linear_system(equations, unknowns, &self.tolerances)
    }

    fn invert_transform(&self, expression: &Rational) -> Result<TimeExpr> {
        inverse_laplace(expression, &self.tolerances)
    }

    fn evaluate_numeric(&self, expression: &TimeExpr, points: &[f64]) -> Vec<f64> {
        expression.sample(points)
    }
}
