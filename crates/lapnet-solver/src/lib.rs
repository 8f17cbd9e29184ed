//! Circuit solving for Lapnet.
//!
//! This crate provides:
//! - Nodal (KCL) equation assembly with the voltage source constraint
//! - The solve pipeline: symbolic solve, inverse transform, sampling
//! - Result types holding transform, time-domain and sampled voltages
//! - Command messages for driving a circuit from a front end
//!
//! # Example
//!
//! ```
//! use lapnet_core::{CircuitModel, ComponentKind, NodeId, Waveform};
//! use lapnet_solver::{SolveOptions, solve_circuit};
//! use lapnet_symbolic::RationalAlgebra;
//!
//! let mut circuit = CircuitModel::new();
//! circuit.add_component(ComponentKind::Resistor, 1.0, "in", "out");
//! circuit.add_component(ComponentKind::Capacitor, 1.0, "out", "GND");
//! circuit.add_source(1.0, 0.0, Waveform::Dc, "in");
//!
//! let solution = solve_circuit(&circuit, &RationalAlgebra::new(), &SolveOptions::default())?;
//! let out = solution.node(&NodeId::from("out")).unwrap();
//! println!("{}", out.time_domain.as_ref().unwrap());
//! # Ok::<(), lapnet_solver::Error>(())
//! ```

pub mod command;
pub mod error;
pub mod nodal;
pub mod options;
pub mod result;
pub mod solve;

pub use command::{Command, Response, Session};
pub use error::{Error, Result};
pub use nodal::{NodalSystem, SOURCE_CURRENT, node_symbol};
pub use options::{SampleGrid, SolveOptions};
pub use result::{CircuitSolution, NodeResult, SampledWaveform};
pub use solve::solve_circuit;
