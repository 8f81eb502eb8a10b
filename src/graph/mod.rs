//! Correlation graph data model
//!
//! This module implements the directed graph the builder emits:
//! - String-identified nodes in one shared namespace, tagged with semantic kinds
//! - Directed edges, at most one per ordered pair, with an optional label
//! - A serializable snapshot for downstream consumers

pub mod edge;
pub mod node;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use snapshot::{GraphSnapshot, SnapshotEdge, SnapshotNode};
pub use store::{CorrelationGraph, GraphError, GraphResult, GraphStatistics};
pub use types::{EdgeId, EdgeLabel, NodeId, NodeKind};
