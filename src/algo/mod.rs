//! Graph analytics
//!
//! Algorithms are implemented in the `iocgraph-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! `CorrelationGraph` into a dense `GraphView` and maps results back to
//! node identifiers.

use crate::graph::{CorrelationGraph, NodeId, NodeKind};
use iocgraph_algorithms::{GraphView, NodeId as AlgoNodeId};
use serde::Serialize;

// Re-export algorithms
pub use iocgraph_algorithms::{
    degree_centrality, top_k_by_score, weakly_connected_components, WccResult,
};

/// A node and its centrality score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub node_id: String,
    pub score: f64,
}

/// One weakly connected group of nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// All member identifiers, sorted
    pub members: Vec<String>,
    /// Members inserted as tags, sorted
    pub tags: Vec<String>,
    /// Members inserted as countries, sorted
    pub countries: Vec<String>,
    pub indicator_count: usize,
}

/// Build a GraphView from the graph for algorithm execution.
///
/// Dense index `i` is the graph node with `NodeId(i)`.
pub fn build_view(graph: &CorrelationGraph) -> GraphView {
    let index_to_node: Vec<AlgoNodeId> = graph.nodes().map(|n| n.id.as_u64()).collect();
    let edges: Vec<(usize, usize)> = graph
        .edges()
        .map(|e| (e.source.as_u64() as usize, e.target.as_u64() as usize))
        .collect();

    GraphView::from_edges(index_to_node, &edges)
}

/// Top `k` nodes by degree centrality.
///
/// Sorted by score descending, ties by identifier ascending. Returns
/// `min(k, node_count)` entries.
pub fn rank(graph: &CorrelationGraph, k: usize) -> Vec<RankedNode> {
    let view = build_view(graph);
    let scores = degree_centrality(&view);

    let named = graph
        .nodes()
        .map(|n| (n.name.as_str(), scores.get(&n.id.as_u64()).copied().unwrap_or(0.0)));

    top_k_by_score(named, k)
        .into_iter()
        .map(|(name, score)| RankedNode {
            node_id: name.to_string(),
            score,
        })
        .collect()
}

/// Weakly connected clusters, largest first (ties by first member).
pub fn clusters(graph: &CorrelationGraph) -> Vec<Cluster> {
    let view = build_view(graph);
    let wcc = weakly_connected_components(&view);

    let mut clusters: Vec<Cluster> = wcc
        .components
        .into_iter()
        .map(|ids| {
            let mut cluster = Cluster {
                members: Vec::with_capacity(ids.len()),
                tags: Vec::new(),
                countries: Vec::new(),
                indicator_count: 0,
            };
            for node in ids
                .into_iter()
                .filter_map(|id| graph.get_node(NodeId::new(id)))
            {
                if node.has_kind(NodeKind::Indicator) {
                    cluster.indicator_count += 1;
                }
                if node.has_kind(NodeKind::Tag) {
                    cluster.tags.push(node.name.clone());
                }
                if node.has_kind(NodeKind::Country) {
                    cluster.countries.push(node.name.clone());
                }
                cluster.members.push(node.name.clone());
            }
            cluster.members.sort();
            cluster.tags.sort();
            cluster.countries.sort();
            cluster
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.members
            .len()
            .cmp(&a.members.len())
            .then_with(|| a.members.first().cmp(&b.members.first()))
    });
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeLabel;

    fn star() -> CorrelationGraph {
        let mut graph = CorrelationGraph::new();
        for leaf in ["b", "c", "d"] {
            graph.connect(("a", NodeKind::Indicator), (leaf, NodeKind::Indicator), None);
        }
        graph
    }

    #[test]
    fn test_graph_view_projection() {
        let graph = star();
        let view = build_view(&graph);

        assert_eq!(view.node_count, 4);
        assert_eq!(view.edge_count(), 3);
        let a = graph.node_id("a").unwrap().as_u64() as usize;
        assert_eq!(view.out_degree(a), 3);
        assert_eq!(view.in_degree(a), 0);
    }

    #[test]
    fn test_rank_star() {
        let ranked = rank(&star(), 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], RankedNode { node_id: "a".into(), score: 1.0 });
        assert_eq!(ranked[1].node_id, "b");
        assert!((ranked[1].score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_k_exceeds_nodes() {
        assert_eq!(rank(&star(), 100).len(), 4);
        assert!(rank(&CorrelationGraph::new(), 5).is_empty());
    }

    #[test]
    fn test_rank_single_node() {
        let mut graph = CorrelationGraph::new();
        graph.ensure_node("only", NodeKind::Indicator);
        assert_eq!(rank(&graph, 1), vec![RankedNode { node_id: "only".into(), score: 0.0 }]);
    }

    #[test]
    fn test_clusters() {
        let mut graph = star();
        graph.connect(("x", NodeKind::Indicator), ("APT9", NodeKind::Tag), None);
        graph.connect(
            ("APT9", NodeKind::Tag),
            ("FR", NodeKind::Country),
            Some(EdgeLabel::targets()),
        );
        graph.ensure_node("lonely", NodeKind::Indicator);

        let found = clusters(&graph);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].members, vec!["a", "b", "c", "d"]);
        assert_eq!(found[0].indicator_count, 4);
        assert_eq!(found[1].members, vec!["APT9", "FR", "x"]);
        assert_eq!(found[1].tags, vec!["APT9"]);
        assert_eq!(found[1].countries, vec!["FR"]);
        assert_eq!(found[2].members, vec!["lonely"]);
    }
}
