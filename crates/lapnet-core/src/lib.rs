//! Core circuit types for Lapnet.
//!
//! This crate provides:
//! - Named nodes with a fixed ground reference
//! - Resistors, capacitors and inductors with Laplace-domain impedances
//! - A single independent voltage source (sine, cosine or DC)
//! - The circuit model: a component arena with node adjacency

pub mod circuit;
pub mod component;
pub mod error;
pub mod node;
pub mod source;

pub use circuit::{CircuitModel, Edge};
pub use component::{Component, ComponentKind};
pub use error::{Error, Result};
pub use node::{GROUND, NodeId};
pub use source::{DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, VoltageSource, Waveform};
