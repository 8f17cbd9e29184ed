//! Circuit topology: a component arena plus node adjacency.

use indexmap::IndexMap;

use crate::component::{Component, ComponentKind};
use crate::node::NodeId;
use crate::source::{VoltageSource, Waveform};

/// A directed edge for circuit diagrams.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub start: NodeId,
    pub end: NodeId,
    pub label: String,
}

/// Components, at most one voltage source, and the nodes that join them.
///
/// Components live in an arena in insertion order. Adjacency from each
/// node to the components touching it is kept up to date as components are
/// added, so topology queries never rescan the arena.
#[derive(Debug, Clone, Default)]
pub struct CircuitModel {
    components: Vec<Component>,
    source: Option<VoltageSource>,
    adjacency: IndexMap<NodeId, Vec<usize>>,
}

impl CircuitModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component and return its index in the arena.
    ///
    /// Node names are created on first reference. Duplicate and parallel
    /// components are allowed.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        value: f64,
        start: impl Into<NodeId>,
        end: impl Into<NodeId>,
    ) -> usize {
        self.push(Component::new(kind, value, start, end))
    }

    /// Add an already-built component and return its index.
    pub fn push(&mut self, component: Component) -> usize {
        let index = self.components.len();
        self.adjacency
            .entry(component.start.clone())
            .or_default()
            .push(index);
        if !component.is_self_loop() {
            self.adjacency
                .entry(component.end.clone())
                .or_default()
                .push(index);
        }
        self.components.push(component);
        index
    }

    /// Set the voltage source from `start` to ground, replacing any existing
    /// one. Returns the source that was replaced.
    pub fn add_source(
        &mut self,
        amplitude: f64,
        frequency: f64,
        waveform: Waveform,
        start: impl Into<NodeId>,
    ) -> Option<VoltageSource> {
        self.set_source(VoltageSource::new(amplitude, frequency, waveform, start))
    }

    /// Install a prepared source, replacing any existing one.
    pub fn set_source(&mut self, source: VoltageSource) -> Option<VoltageSource> {
        self.source.replace(source)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn source(&self) -> Option<&VoltageSource> {
        self.source.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.source.is_none()
    }

    /// Distinct nodes in order of first reference.
    ///
    /// Component endpoints come first, then the source nodes if no
    /// component mentions them. Ground is included when referenced.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.adjacency.keys().cloned().collect();
        if let Some(source) = &self.source {
            for node in [&source.start, &source.end] {
                if !nodes.contains(node) {
                    nodes.push(node.clone());
                }
            }
        }
        nodes
    }

    /// Indices of components with an endpoint at `node`.
    pub fn incident(&self, node: &NodeId) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labelled edges for drawing: one per component, then the source.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .components
            .iter()
            .map(|c| Edge {
                start: c.start.clone(),
                end: c.end.clone(),
                label: c.label(),
            })
            .collect();
        if let Some(source) = &self.source {
            edges.push(Edge {
                start: source.start.clone(),
                end: source.end.clone(),
                label: source.label(),
            });
        }
        edges
    }
}
