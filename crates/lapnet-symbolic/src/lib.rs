//! Symbolic transform-domain algebra for Lapnet.
//!
//! This crate provides:
//! - Real-coefficient polynomials and rational functions in `s`
//! - Affine expressions and equations over named symbols
//! - Linear solving over rational functions (fraction-free determinants)
//! - Inverse Laplace transforms by partial fraction expansion
//! - The [`SymbolicAlgebra`] capability trait and its default implementation

pub mod algebra;
pub mod error;
pub mod expr;
pub mod inverse;
pub mod linear;
pub mod polynomial;
pub mod rational;

pub use algebra::{RationalAlgebra, SymbolicAlgebra, Tolerances};
pub use error::{Error, Result};
pub use expr::{Equation, LinearExpr, Symbol};
pub use inverse::{TimeExpr, TimeTerm, inverse_laplace};
pub use linear::{determinant, solve_linear_system};
pub use polynomial::Polynomial;
pub use rational::Rational;
