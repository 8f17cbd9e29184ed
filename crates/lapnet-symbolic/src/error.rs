//! Error types for symbolic operations.

use thiserror::Error;

use crate::expr::Symbol;

/// Errors raised by the rational-function engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Division by a polynomial or rational function that is identically zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Equation and unknown counts differ.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An equation references a symbol that is not in the unknown set.
    #[error("equation references {0}, which is not an unknown")]
    UnknownSymbol(Symbol),

    /// The system determinant is identically zero.
    #[error("system has no unique solution (determinant is identically zero)")]
    Singular,

    /// Numerator degree is not below denominator degree, so the inverse
    /// contains impulses.
    #[error(
        "improper expression: numerator degree {numerator_degree} >= denominator degree {denominator_degree}"
    )]
    ImproperExpression {
        numerator_degree: usize,
        denominator_degree: usize,
    },

    /// Partial fraction expansion failed numerically.
    #[error("no closed-form inverse: {0}")]
    NoClosedForm(String),
}

/// Result type for symbolic operations.
pub type Result<T> = std::result::Result<T, Error>;
