//! Error types for the solve pipeline.

use lapnet_core::NodeId;
use thiserror::Error;

/// Errors raised while solving a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `solve` was called before any source was added.
    #[error("no voltage source defined")]
    NoSourceDefined,

    /// The nodal system has no solution or infinitely many.
    #[error("no unique solution: {reason}")]
    NoUniqueSolution { reason: String },

    /// A node's transform-domain expression has no closed-form inverse.
    #[error("cannot invert expression for node {node}: {reason}")]
    InversionFailure { node: NodeId, reason: String },

    /// Invalid component or source.
    #[error(transparent)]
    Circuit(#[from] lapnet_core::Error),
}

impl Error {
    pub(crate) fn no_unique(reason: impl Into<String>) -> Self {
        Error::NoUniqueSolution {
            reason: reason.into(),
        }
    }
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;
