//! Degree centrality
//!
//! Score of a node is its number of incident edges normalized by the
//! maximum possible, `n - 1`.

use super::common::{GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Calculate degree centrality for every node in the view.
///
/// `(in_degree + out_degree) / (n - 1)` for `n > 1`. A graph with zero or
/// one node scores every node 0.
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let mut result = HashMap::with_capacity(n);

    if n <= 1 {
        for &node in &view.index_to_node {
            result.insert(node, 0.0);
        }
        return result;
    }

    let scale = 1.0 / (n - 1) as f64;
    for idx in 0..n {
        result.insert(view.index_to_node[idx], view.degree(idx) as f64 * scale);
    }

    result
}

/// Order `(key, score)` pairs by score descending, ties by key ascending,
/// and keep the first `k`.
///
/// Scores are compared with `total_cmp`, so NaN never makes the order
/// depend on input order.
pub fn top_k_by_score<K: Ord>(
    scores: impl IntoIterator<Item = (K, f64)>,
    k: usize,
) -> Vec<(K, f64)> {
    let mut ranked: Vec<(K, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_centrality() {
        // Hub 1 points at 2, 3, 4
        let view = GraphView::from_edges(vec![1, 2, 3, 4], &[(0, 1), (0, 2), (0, 3)]);
        let scores = degree_centrality(&view);

        assert_eq!(scores[&1], 1.0);
        assert!((scores[&2] - 1.0 / 3.0).abs() < 1e-12);
        assert!((scores[&4] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_node_scores_zero() {
        let view = GraphView::from_edges(vec![7], &[(0, 0)]);
        let scores = degree_centrality(&view);
        assert_eq!(scores[&7], 0.0);
    }

    #[test]
    fn test_empty_graph() {
        let view = GraphView::from_edges(Vec::new(), &[]);
        assert!(degree_centrality(&view).is_empty());
    }

    #[test]
    fn test_top_k_tie_break() {
        let ranked = top_k_by_score(
            vec![("b", 0.5), ("c", 1.0), ("a", 0.5), ("d", 0.1)],
            3,
        );
        assert_eq!(ranked, vec![("c", 1.0), ("a", 0.5), ("b", 0.5)]);
    }

    #[test]
    fn test_top_k_larger_than_input() {
        let ranked = top_k_by_score(vec![(2u64, 0.0), (1u64, 0.0)], 10);
        assert_eq!(ranked, vec![(1, 0.0), (2, 0.0)]);
    }

    #[test]
    fn test_top_k_zero() {
        assert!(top_k_by_score(vec![("x", 1.0)], 0).is_empty());
    }
}
