//! In-memory correlation graph storage
//!
//! A simple directed graph keyed by string identifiers. Nodes and edges are
//! stored in insertion-ordered arenas; lookups by name and by ordered pair go
//! through hash indices.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, EdgeLabel, NodeId, NodeKind};
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Snapshot edge references unknown node '{0}'")]
    UnknownSnapshotNode(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Node and edge counts broken down by role
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub indicator_nodes: usize,
    pub tag_nodes: usize,
    pub country_nodes: usize,
    /// Identifiers inserted under more than one role
    pub ambiguous_nodes: usize,
    pub labeled_edges: usize,
}

/// Directed correlation graph
///
/// - nodes: NodeId -> Node (arena, index = id)
/// - edges: EdgeId -> Edge (arena, index = id)
/// - outgoing / incoming: per-node adjacency lists of EdgeIds
/// - name_index: identifier -> NodeId
/// - pair_index: (source, target) -> EdgeId, enforcing one edge per ordered pair
#[derive(Debug, Default)]
pub struct CorrelationGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    name_index: FxHashMap<String, NodeId>,
    pair_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl CorrelationGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `name`, creating it if absent.
    ///
    /// An existing node gains `kind` as an extra role.
    pub fn ensure_node(&mut self, name: &str, kind: NodeKind) -> NodeId {
        if let Some(&id) = self.name_index.get(name) {
            self.nodes[id.index()].add_kind(kind);
            return id;
        }

        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(Node::new(id, name, kind));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.name_index.insert(name.to_string(), id);
        id
    }

    /// Insert a directed edge between existing nodes.
    ///
    /// Inserting an ordered pair that already exists returns the existing
    /// edge. A `Some` label replaces the stored one; `None` leaves it as is.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: Option<EdgeLabel>,
    ) -> GraphResult<EdgeId> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        Ok(self.insert_edge(source, target, label))
    }

    /// Insert `source -> target` by name, creating either node as needed.
    pub fn connect(
        &mut self,
        source: (&str, NodeKind),
        target: (&str, NodeKind),
        label: Option<EdgeLabel>,
    ) -> EdgeId {
        let source_id = self.ensure_node(source.0, source.1);
        let target_id = self.ensure_node(target.0, target.1);

        self.insert_edge(source_id, target_id, label)
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId, label: Option<EdgeLabel>) -> EdgeId {
        if let Some(&existing) = self.pair_index.get(&(source, target)) {
            if label.is_some() {
                self.edges[existing.index()].label = label;
            }
            return existing;
        }

        let id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(id, source, target, label));
        self.outgoing[source.index()].push(id);
        self.incoming[target.index()].push(id);
        self.pair_index.insert((source, target), id);
        id
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node by identifier
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.get_node(id))
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// The edge `source -> target`, if present
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        let s = self.node_id(source)?;
        let t = self.node_id(target)?;
        self.pair_index
            .get(&(s, t))
            .and_then(|id| self.get_edge(*id))
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge_between(source, target).is_some()
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.node_id(name)
            .map(|id| self.outgoing[id.index()].len())
            .unwrap_or(0)
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.node_id(name)
            .map(|id| self.incoming[id.index()].len())
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges as `(source, target, label)` identifier triples, in insertion order
    pub fn edge_triples(&self) -> Vec<(&str, &str, Option<&str>)> {
        self.edges
            .iter()
            .map(|e| {
                (
                    self.nodes[e.source.index()].name.as_str(),
                    self.nodes[e.target.index()].name.as_str(),
                    e.label_str(),
                )
            })
            .collect()
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            ..GraphStatistics::default()
        };

        for node in &self.nodes {
            if node.has_kind(NodeKind::Indicator) {
                stats.indicator_nodes += 1;
            }
            if node.has_kind(NodeKind::Tag) {
                stats.tag_nodes += 1;
            }
            if node.has_kind(NodeKind::Country) {
                stats.country_nodes += 1;
            }
            if node.is_ambiguous() {
                stats.ambiguous_nodes += 1;
            }
        }
        stats.labeled_edges = self.edges.iter().filter(|e| e.label.is_some()).count();

        stats
    }
}
