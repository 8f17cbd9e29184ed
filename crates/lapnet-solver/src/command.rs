//! Command messages for driving a circuit from a front end.
//!
//! A [`Session`] owns one [`CircuitModel`] and handles each [`Command`]
//! synchronously, returning a [`Response`] or an error.

use lapnet_core::{CircuitModel, ComponentKind, NodeId, Waveform};
use lapnet_symbolic::{RationalAlgebra, SymbolicAlgebra};

use crate::error::Result;
use crate::options::SolveOptions;
use crate::result::CircuitSolution;
use crate::solve::solve_circuit;

/// A request to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddComponent {
        kind: ComponentKind,
        value: f64,
        start: NodeId,
        end: NodeId,
    },
    /// Replace the voltage source. Its negative terminal is ground.
    AddSource {
        amplitude: f64,
        frequency: f64,
        waveform: Waveform,
        start: NodeId,
    },
    Solve,
}

/// Outcome of a successful [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Arena index of the new component.
    ComponentAdded(usize),
    /// Whether an earlier source was replaced.
    SourceSet { replaced: bool },
    Solved(Box<CircuitSolution>),
}

/// A circuit plus the algebra and options used to solve it.
#[derive(Debug, Clone, Default)]
pub struct Session<A: SymbolicAlgebra = RationalAlgebra> {
    circuit: CircuitModel,
    algebra: A,
    options: SolveOptions,
}

impl Session<RationalAlgebra> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: SymbolicAlgebra> Session<A> {
    /// Create a session that solves with a custom algebra.
    pub fn with_algebra(algebra: A) -> Self {
        Self {
            circuit: CircuitModel::new(),
            algebra,
            options: SolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn circuit(&self) -> &CircuitModel {
        &self.circuit
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Apply one command.
    pub fn handle(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::AddComponent {
                kind,
                value,
                start,
                end,
            } => {
                let index = self.circuit.add_component(kind, value, start, end);
                Ok(Response::ComponentAdded(index))
            }
            Command::AddSource {
                amplitude,
                frequency,
                waveform,
                start,
            } => {
                let previous = self
                    .circuit
                    .add_source(amplitude, frequency, waveform, start);
                if let Some(old) = &previous {
                    log::debug!("replacing source at {}", old.start);
                }
                Ok(Response::SourceSet {
                    replaced: previous.is_some(),
                })
            }
            Command::Solve => {
                let solution = solve_circuit(&self.circuit, &self.algebra, &self.options)?;
                Ok(Response::Solved(Box::new(solution)))
            }
        }
    }
}
