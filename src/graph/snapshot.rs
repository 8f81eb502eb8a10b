//! Serializable graph snapshot
//!
//! The hand-off format for renderers and other consumers. Carries node
//! identifiers, node kinds and edge labels without loss.

use super::store::{CorrelationGraph, GraphError, GraphResult};
use super::types::{EdgeLabel, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: String,
    pub kinds: BTreeSet<NodeKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<EdgeLabel>,
}

/// Nodes and edges in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl CorrelationGraph {
    pub fn snapshot(&self) -> GraphSnapshot {
        let nodes = self
            .nodes()
            .map(|n| SnapshotNode {
                id: n.name.clone(),
                kinds: n.kinds.clone(),
            })
            .collect();

        let edges = self
            .edge_triples()
            .into_iter()
            .map(|(source, target, label)| SnapshotEdge {
                source: source.to_string(),
                target: target.to_string(),
                label: label.map(EdgeLabel::from),
            })
            .collect();

        GraphSnapshot { nodes, edges }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Every edge endpoint must appear in `nodes`.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> GraphResult<Self> {
        let mut graph = CorrelationGraph::new();

        for node in &snapshot.nodes {
            for &kind in &node.kinds {
                graph.ensure_node(&node.id, kind);
            }
        }

        for edge in &snapshot.edges {
            let source = graph
                .node_id(&edge.source)
                .ok_or_else(|| GraphError::UnknownSnapshotNode(edge.source.clone()))?;
            let target = graph
                .node_id(&edge.target)
                .ok_or_else(|| GraphError::UnknownSnapshotNode(edge.target.clone()))?;
            graph.add_edge(source, target, edge.label.clone())?;
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CorrelationGraph {
        let mut graph = CorrelationGraph::new();
        graph.connect(("aaa", NodeKind::Indicator), ("bbb", NodeKind::Indicator), None);
        graph.connect(("aaa", NodeKind::Indicator), ("CommentPanda", NodeKind::Tag), None);
        graph.connect(
            ("CommentPanda", NodeKind::Tag),
            ("US", NodeKind::Country),
            Some(EdgeLabel::targets()),
        );
        graph
    }

    #[test]
    fn test_snapshot_round_trip() {
        let graph = sample();
        let snapshot = graph.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: GraphSnapshot = serde_json::from_str(&json).unwrap();
        let rebuilt = CorrelationGraph::from_snapshot(&decoded).unwrap();

        assert_eq!(rebuilt.snapshot(), snapshot);
        assert_eq!(rebuilt.edge_triples(), graph.edge_triples());
    }

    #[test]
    fn test_unlabeled_edges_omit_label() {
        let json = serde_json::to_value(sample().snapshot()).unwrap();
        assert!(json["edges"][0].get("label").is_none());
        assert_eq!(json["edges"][2]["label"], "targets");
        assert_eq!(json["nodes"][3]["kinds"][0], "country");
    }

    #[test]
    fn test_unknown_edge_endpoint() {
        let snapshot = GraphSnapshot {
            nodes: vec![SnapshotNode {
                id: "a".into(),
                kinds: [NodeKind::Indicator].into_iter().collect(),
            }],
            edges: vec![SnapshotEdge {
                source: "a".into(),
                target: "ghost".into(),
                label: None,
            }],
        };

        let err = CorrelationGraph::from_snapshot(&snapshot).unwrap_err();
        assert_eq!(err, GraphError::UnknownSnapshotNode("ghost".into()));
    }
}
