//! Follower Graph
//!
//! In-memory analytics for large follower networks: a directed edge list of
//! (follower, target) pairs goes in, degree statistics and rankings come out.
//!
//! # Architecture
//!
//! - [`graph`]: parses edge records and builds a simple directed
//!   [`FollowGraph`], either directly or with a chunked parallel build whose
//!   result does not depend on the chunking
//! - [`algo`]: adapter from the graph to the CSR view used by the
//!   `follower-graph-algorithms` crate (frequency tables, degree centrality,
//!   PageRank, HITS, top-K selection) and ready-made reports
//! - [`config`]: analysis settings with defaults, loadable from YAML or JSON
//!
//! Every entry point is a function of its explicit arguments; nothing is
//! cached between calls.
//!
//! ## Example Usage
//!
//! ```rust
//! use follower_graph::algo::{self, PageRankConfig};
//! use follower_graph::graph::{build_parallel, FollowGraph};
//!
//! let edges = vec![(1u64, 2u64), (2, 3), (3, 1), (4, 3)];
//!
//! // Parallel and direct builds agree
//! let graph = build_parallel(&edges, 4).unwrap();
//! assert_eq!(graph, FollowGraph::build(&edges).unwrap());
//!
//! // Node 3 has the most followers
//! let targets = algo::in_degree_frequency(&graph);
//! assert_eq!(targets.top(1), vec![(3, 2)]);
//!
//! // PageRank sums to one
//! let ranks = algo::page_rank(&graph, PageRankConfig::default()).unwrap();
//! let total: f64 = ranks.scores.values().sum();
//! assert!((total - 1.0).abs() < 1e-6);
//!
//! // Edges of a single user
//! let edges_of_three = graph.edges_of(3);
//! assert_eq!(edges_of_three.incoming.len(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use algo::{Analysis, AnalysisError, FrequencyReport, HitsReport, RankingReport};
pub use config::{AnalysisConfig, ConfigError, DEFAULT_TOP, MAX_TOP};
pub use graph::{
    build_parallel, delimited_rows, DelimitedRow, Edge, EdgeRecord, FollowGraph, GraphError,
    GraphResult, NodeEdges, NodeId, DEFAULT_WORKERS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the crate version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
