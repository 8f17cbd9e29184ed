//! Error types for circuit construction.

use thiserror::Error;

use crate::component::ComponentKind;

/// Errors raised while building a circuit or its transform-domain models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Component kind tag is not resistor, capacitor or inductor.
    #[error("unknown component kind: {0}")]
    UnknownComponentKind(String),

    /// Source waveform tag is not sin, cos or DC.
    #[error("unsupported waveform: {0}")]
    UnsupportedWaveform(String),

    /// The component's value makes its impedance (or admittance) degenerate.
    #[error("degenerate impedance for {kind} with value {value}")]
    ZeroImpedanceFault { kind: ComponentKind, value: f64 },

    /// Transform-domain construction failed.
    #[error("algebra error: {0}")]
    Algebra(#[from] lapnet_symbolic::Error),
}

/// Result type for circuit construction.
pub type Result<T> = std::result::Result<T, Error>;
