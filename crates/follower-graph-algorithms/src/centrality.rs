//! Degree centrality
//!
//! score(v) = (out(v) + in(v)) / (N - 1)

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Node id -> centrality score
pub type CentralityTable = HashMap<NodeId, f64>;

/// Degree centrality for every node in the view.
///
/// A graph with at most one node scores everything 0.
pub fn degree_centrality(view: &GraphView) -> CentralityTable {
    let n = view.node_count;
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

    (0..n)
        .map(|idx| {
            let degree = view.out_degree(idx) + view.in_degree(idx);
            (view.index_to_node[idx], degree as f64 * scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_centrality() {
        let view = GraphView::from_edges(vec![(1, 2), (2, 3), (3, 1)]);
        let scores = degree_centrality(&view);

        assert_eq!(scores.len(), 3);
        for node in [1, 2, 3] {
            assert_eq!(scores[&node], 1.0);
        }
    }

    #[test]
    fn test_isolated_node_scores_zero() {
        // node 9 kept in the view without any edge
        let view = GraphView::from_adjacency_list(
            vec![1, 2, 9],
            vec![vec![1], vec![], vec![]],
            vec![vec![], vec![0], vec![]],
        );
        let scores = degree_centrality(&view);

        assert_eq!(scores[&9], 0.0);
        assert_eq!(scores[&1], 0.5);
        assert_eq!(scores[&2], 0.5);
    }

    #[test]
    fn test_single_node_scores_zero() {
        let view = GraphView::from_edges(vec![(4, 4)]);
        let scores = degree_centrality(&view);

        assert_eq!(scores.len(), 1);
        assert_eq!(scores[&4], 0.0);
    }
}
