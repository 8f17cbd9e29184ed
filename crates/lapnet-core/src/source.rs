//! Independent voltage source and its Laplace-domain expression.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use lapnet_symbolic::{Polynomial, Rational};

use crate::error::{Error, Result};
use crate::node::NodeId;

/// Default source amplitude in volts.
pub const DEFAULT_AMPLITUDE: f64 = 1.0;

/// Default source frequency in hertz (one radian per second).
pub const DEFAULT_FREQUENCY: f64 = 0.159154943;

/// Source waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    /// `A·sin(ωt)`
    Sine,
    /// `A·cos(ωt)`
    #[default]
    Cosine,
    /// Step of height `A` at `t = 0`.
    Dc,
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Waveform::Sine => "sin",
            Waveform::Cosine => "cos",
            Waveform::Dc => "DC",
        };
        f.write_str(tag)
    }
}

impl FromStr for Waveform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sin" | "sine" => Ok(Waveform::Sine),
            "cos" | "cosine" => Ok(Waveform::Cosine),
            "dc" => Ok(Waveform::Dc),
            _ => Err(Error::UnsupportedWaveform(s.to_string())),
        }
    }
}

/// An independent voltage source from `start` to ground.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    pub amplitude: f64,
    /// Frequency in hertz. Ignored for DC.
    pub frequency: f64,
    pub waveform: Waveform,
    pub start: NodeId,
    /// Always ground.
    pub end: NodeId,
}

impl Default for VoltageSource {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            frequency: DEFAULT_FREQUENCY,
            waveform: Waveform::default(),
            start: NodeId::ground(),
            end: NodeId::ground(),
        }
    }
}

impl VoltageSource {
    pub fn new(amplitude: f64, frequency: f64, waveform: Waveform, start: impl Into<NodeId>) -> Self {
        Self {
            amplitude,
            frequency,
            waveform,
            start: start.into(),
            end: NodeId::ground(),
        }
    }

    /// Angular frequency `ω = 2πf`.
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    /// Laplace transform of the source voltage.
    ///
    /// | Waveform | E(s)            |
    /// |----------|-----------------|
    /// | Sine     | `A·ω/(s² + ω²)` |
    /// | Cosine   | `A·s/(s² + ω²)` |
    /// | DC       | `A/s`           |
    pub fn expression(&self) -> Result<Rational> {
        let a = self.amplitude;
        let omega = self.angular_frequency();
        let resonance = Polynomial::from_coeffs(vec![omega * omega, 0.0, 1.0]);

        let e = match self.waveform {
            Waveform::Sine => Rational::new(Polynomial::constant(a * omega), resonance)?,
            Waveform::Cosine => Rational::new(Polynomial::monomial(a, 1), resonance)?,
            Waveform::Dc => Rational::new(Polynomial::constant(a), Polynomial::s())?,
        };
        Ok(e)
    }

    /// Diagram label such as `V=1Vcos`.
    pub fn label(&self) -> String {
        format!("V={}V{}", self.amplitude, self.waveform)
    }
}
