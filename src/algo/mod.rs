//! Graph analytics module
//!
//! Analytics are implemented in the `follower-graph-algorithms` crate over a
//! CSR [`GraphView`]. This module provides the adapter layer from
//! [`FollowGraph`] plus the graph-level entry points.

mod analysis;

use crate::graph::{FollowGraph, NodeId};
use std::collections::HashMap;

pub use analysis::{Analysis, AnalysisError, FrequencyReport, HitsReport, RankingReport};

// Re-export algorithms
pub use follower_graph_algorithms::{
    top_k, top_k_map, AlgoError, AlgoResult, CentralityTable, Convergence, Deadline,
    DegreeStats, FrequencyTable, GraphView, HitsConfig, HitsResult, Interrupt, Never,
    PageRankConfig, PageRankResult, Score, DEFAULT_BUCKETS,
};
pub use follower_graph_algorithms::frequency;

/// Build a GraphView from the graph for algorithm execution.
///
/// Dense indices follow ascending node id, so scores and tie-breaks are
/// reproducible between runs.
pub fn build_view(graph: &FollowGraph) -> GraphView {
    // 1. Build index mappings
    let index_to_node = graph.nodes();
    let node_to_index: HashMap<NodeId, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, &node)| (node, idx))
        .collect();

    // 2. Build adjacency lists
    let mut outgoing: Vec<Vec<usize>> = Vec::with_capacity(index_to_node.len());
    let mut incoming: Vec<Vec<usize>> = Vec::with_capacity(index_to_node.len());

    for &node in &index_to_node {
        let (mut targets, mut followers) = match graph.adjacency(node) {
            Some(adjacency) => (
                adjacency
                    .outgoing
                    .iter()
                    .map(|t| node_to_index[t])
                    .collect::<Vec<_>>(),
                adjacency
                    .incoming
                    .iter()
                    .map(|f| node_to_index[f])
                    .collect::<Vec<_>>(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        targets.sort_unstable();
        followers.sort_unstable();
        outgoing.push(targets);
        incoming.push(followers);
    }

    // 3. Convert to CSR
    GraphView::from_adjacency_list(index_to_node, outgoing, incoming)
}

/// Counts by follower (how many targets each follower follows)
pub fn out_degree_frequency(graph: &FollowGraph) -> FrequencyTable {
    frequency::out_degree_frequency(&build_view(graph))
}

/// Counts by target (how many followers each target has)
pub fn in_degree_frequency(graph: &FollowGraph) -> FrequencyTable {
    frequency::in_degree_frequency(&build_view(graph))
}

/// Degree centrality of every node in `graph`
pub fn degree_centrality(graph: &FollowGraph) -> CentralityTable {
    follower_graph_algorithms::degree_centrality(&build_view(graph))
}

/// PageRank over `graph`.
///
/// Pass a subgraph (see [`FollowGraph::induced_subgraph`]) to rank a filtered view.
pub fn page_rank(graph: &FollowGraph, config: PageRankConfig) -> AlgoResult<PageRankResult> {
    follower_graph_algorithms::page_rank(&build_view(graph), config)
}

/// PageRank over `graph`, giving up once `interrupt` trips
pub fn page_rank_with<I: Interrupt + ?Sized>(
    graph: &FollowGraph,
    config: PageRankConfig,
    interrupt: &I,
) -> AlgoResult<PageRankResult> {
    follower_graph_algorithms::page_rank_with(&build_view(graph), config, interrupt)
}

/// Hub and authority scores over `graph`
pub fn hits(graph: &FollowGraph, config: HitsConfig) -> AlgoResult<HitsResult> {
    follower_graph_algorithms::hits(&build_view(graph), config)
}

pub fn hits_with<I: Interrupt + ?Sized>(
    graph: &FollowGraph,
    config: HitsConfig,
    interrupt: &I,
) -> AlgoResult<HitsResult> {
    follower_graph_algorithms::hits_with(&build_view(graph), config, interrupt)
}
