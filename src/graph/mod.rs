//! Follower graph construction
//!
//! This module builds the directed follower graph with:
//! - Parsing of raw edge records into follower -> target edges
//! - Simple-graph semantics: duplicates collapse, self-loops stay
//! - A chunked parallel build whose merge is independent of the chunking

pub mod parallel;
pub mod store;
pub mod types;

// Re-export main types
pub use parallel::{build_parallel, chunk_bounds, DEFAULT_WORKERS};
pub use store::{Adjacency, FollowGraph, GraphError, GraphResult, NodeEdges};
pub use types::{delimited_rows, DelimitedRow, Edge, EdgeRecord, NodeId};
