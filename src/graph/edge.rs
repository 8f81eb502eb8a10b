//! Edge implementation for the correlation graph

use super::types::{EdgeId, EdgeLabel, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge in the correlation graph
///
/// At most one edge exists per ordered `(source, target)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Optional label (e.g., "targets")
    pub label: Option<EdgeLabel>,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, label: Option<EdgeLabel>) -> Self {
        Edge {
            id,
            source,
            target,
            label,
        }
    }

    /// Label as a string slice, if any
    pub fn label_str(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.as_str())
    }
}
