//! Node identifiers.

use std::fmt;

/// Name of the reference node.
pub const GROUND: &str = "GND";

/// A node in the circuit, identified by name.
///
/// Names are not validated; any string is a node. The node named [`GROUND`]
/// is the reference and is fixed at zero volts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The ground node.
    pub fn ground() -> Self {
        Self(GROUND.to_string())
    }

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == GROUND
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
