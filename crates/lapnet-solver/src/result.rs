//! Result types for a circuit solve.

use indexmap::IndexMap;
use lapnet_core::NodeId;
use lapnet_symbolic::{Rational, Symbol, TimeExpr};

/// A time-domain waveform sampled on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWaveform {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl SampledWaveform {
    /// Pair sample times with values. Extra entries on either side are
    /// ignored.
    pub fn new(mut times: Vec<f64>, mut values: Vec<f64>) -> Self {
        let len = times.len().min(values.len());
        times.truncate(len);
        values.truncate(len);
        Self { times, values }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(time, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Interpolate the waveform at a specific time.
    ///
    /// Uses linear interpolation between the two nearest samples and clamps
    /// to the end values outside the sampled range. Returns None if there
    /// are no samples.
    pub fn interpolate_at(&self, time: f64) -> Option<f64> {
        let first = *self.times.first()?;
        let last = *self.times.last()?;

        if time <= first {
            return self.values.first().copied();
        }
        if time >= last {
            return self.values.last().copied();
        }

        // First sample strictly after `time`; its predecessor is at or before
        let upper = self.times.partition_point(|&t| t <= time);
        let (t0, t1) = (self.times[upper - 1], self.times[upper]);
        let (v0, v1) = (self.values[upper - 1], self.values[upper]);
        if t1 == t0 {
            return Some(v0);
        }
        let alpha = (time - t0) / (t1 - t0);
        Some(v0 * (1.0 - alpha) + v1 * alpha)
    }

    /// Value at the last sample.
    pub fn final_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Solution for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeResult {
    pub node: NodeId,
    /// Transform-domain voltage.
    pub transform: Rational,
    /// Closed-form time-domain voltage. None when the transform is zero.
    pub time_domain: Option<TimeExpr>,
    /// Sampled time-domain voltage. None when the transform is zero.
    pub samples: Option<SampledWaveform>,
}

impl NodeResult {
    /// A node whose transform-domain voltage is identically zero.
    pub fn zero(node: NodeId) -> Self {
        Self {
            node,
            transform: Rational::zero(),
            time_domain: None,
            samples: None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.transform.is_zero()
    }
}

/// Result of solving a circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitSolution {
    /// Reported nodes, in solver order.
    pub(crate) nodes: IndexMap<NodeId, NodeResult>,
    /// Every entry the solver returned, before one was dropped.
    pub(crate) solved: IndexMap<Symbol, Rational>,
    /// The entry removed before reporting.
    pub(crate) dropped: Option<(Symbol, Rational)>,
    /// Sample times shared by every waveform.
    pub(crate) times: Vec<f64>,
}

impl CircuitSolution {
    /// Reported node results, in solver order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeResult> {
        self.nodes.values()
    }

    pub fn node(&self, node: &NodeId) -> Option<&NodeResult> {
        self.nodes.get(node)
    }

    /// Number of reported nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The full solver mapping, including the dropped entry.
    pub fn solved(&self) -> &IndexMap<Symbol, Rational> {
        &self.solved
    }

    /// The solver entry that was not reported.
    pub fn dropped(&self) -> Option<(&Symbol, &Rational)> {
        self.dropped.as_ref().map(|(symbol, expr)| (symbol, expr))
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// `(node, samples)` pairs for plotting. Zero nodes are left out.
    pub fn series(&self) -> Vec<(&NodeId, &SampledWaveform)> {
        self.nodes
            .values()
            .filter_map(|r| r.samples.as_ref().map(|s| (&r.node, s)))
            .collect()
    }

    /// Voltage of a node at a specific time, interpolated from its samples.
    ///
    /// Zero nodes read as 0. Returns None for unknown nodes.
    pub fn voltage_at(&self, node: &NodeId, time: f64) -> Option<f64> {
        let result = self.nodes.get(node)?;
        match &result.samples {
            Some(samples) => samples.interpolate_at(time),
            None => Some(0.0),
        }
    }
}
