//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the follower graph for algorithm execution,
//! plus the error and convergence types every solver reports through.

use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Errors raised by the analytics in this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("computation interrupted after {iterations} iterations")]
    Interrupted { iterations: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type AlgoResult<T> = Result<T, AlgoError>;

/// Outcome of an iterative solver.
///
/// `NotReached` is not an error: the solver hit its iteration cap and the
/// accompanying vector is the last iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum Convergence {
    Converged { iterations: usize },
    NotReached { iterations: usize, residual: f64 },
}

impl Convergence {
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match *self {
            Convergence::Converged { iterations } => iterations,
            Convergence::NotReached { iterations, .. } => iterations,
        }
    }
}

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Dense indices follow ascending `NodeId` order when built through
/// [`GraphView::from_edges`], so every derived output is reproducible.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of follower node indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (targets) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (followers) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.node_to_index.get(&node).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Create a GraphView from per-node adjacency lists.
    ///
    /// `outgoing[i]` and `incoming[i]` hold dense indices and must describe the
    /// same edge set from both ends.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Build a view straight from (follower, target) pairs. Duplicates collapse.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let edges: BTreeSet<(NodeId, NodeId)> = edges.into_iter().collect();
        let nodes: BTreeSet<NodeId> = edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        let index_to_node: Vec<NodeId> = nodes.into_iter().collect();
        let node_to_index: HashMap<NodeId, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut outgoing = vec![Vec::new(); index_to_node.len()];
        let mut incoming = vec![Vec::new(); index_to_node.len()];
        for (u, v) in edges {
            let (u_idx, v_idx) = (node_to_index[&u], node_to_index[&v]);
            outgoing[u_idx].push(v_idx);
            incoming[v_idx].push(u_idx);
        }
        for sources in &mut incoming {
            sources.sort_unstable();
        }

        Self::from_adjacency_list(index_to_node, outgoing, incoming)
    }

    pub(crate) fn ensure_non_empty(&self) -> AlgoResult<()> {
        if self.is_empty() {
            return Err(AlgoError::EmptyGraph);
        }
        Ok(())
    }

    /// Map a dense score vector back to NodeIds
    pub(crate) fn to_node_map(&self, values: Vec<f64>) -> HashMap<NodeId, f64> {
        self.index_to_node.iter().copied().zip(values).collect()
    }
}
