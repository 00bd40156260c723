//! In-memory follower graph
//!
//! A simple directed graph: duplicate edges collapse, self-loops stay.
//! Every id seen in any edge is a node, even when one of its directions is empty.

use super::types::{Edge, EdgeRecord, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Malformed edge at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("Edge list is empty: graph has no nodes")]
    EmptyGraph,

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Failed to start build workers: {0}")]
    WorkerPool(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Out- and in-neighbors of one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Targets this node follows
    pub outgoing: FxHashSet<NodeId>,
    /// Followers of this node
    pub incoming: FxHashSet<NodeId>,
}

/// Edges touching a single node, each list sorted by the opposite endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeEdges {
    pub node: NodeId,
    /// node -> target
    pub outgoing: Vec<Edge>,
    /// follower -> node
    pub incoming: Vec<Edge>,
}

impl NodeEdges {
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }

    /// Both directions, outgoing first. A self-loop is listed once.
    pub fn all(&self) -> Vec<Edge> {
        let mut edges = self.outgoing.clone();
        edges.extend(self.incoming.iter().filter(|e| !e.is_self_loop()));
        edges
    }
}

/// Directed follower graph
///
/// - adjacency: NodeId -> (outgoing set, incoming set)
/// - edge_count: number of distinct edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowGraph {
    adjacency: FxHashMap<NodeId, Adjacency>,
    edge_count: usize,
}

impl FollowGraph {
    /// Build a graph from edge records.
    ///
    /// Fails on the first malformed record, or when there are no records at all.
    pub fn build<I, R>(edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: EdgeRecord,
    {
        let graph = Self::from_records(edges, 0)?;
        if graph.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built follower graph"
        );
        Ok(graph)
    }

    /// Build a possibly empty partial graph. `first_row` offsets row numbers
    /// in errors so chunked builds report global positions.
    pub(crate) fn from_records<I, R>(edges: I, first_row: usize) -> GraphResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: EdgeRecord,
    {
        let mut graph = FollowGraph::default();
        for (offset, record) in edges.into_iter().enumerate() {
            let edge = record.to_edge(first_row + offset)?;
            graph.insert_edge(edge.follower, edge.target);
        }
        Ok(graph)
    }

    /// Insert an edge; returns false if it was already present
    pub(crate) fn insert_edge(&mut self, follower: NodeId, target: NodeId) -> bool {
        let added = self
            .adjacency
            .entry(follower)
            .or_default()
            .outgoing
            .insert(target);
        self.adjacency
            .entry(target)
            .or_default()
            .incoming
            .insert(follower);
        if added {
            self.edge_count += 1;
        }
        added
    }

    fn insert_node(&mut self, node: NodeId) {
        self.adjacency.entry(node).or_default();
    }

    /// Set-union `other` into `self`.
    ///
    /// Idempotent, associative and commutative: merging partial graphs in any
    /// grouping or order gives the same graph as building from all edges.
    pub fn merge(&mut self, other: FollowGraph) {
        for (node, adjacency) in other.adjacency {
            let entry = self.adjacency.entry(node).or_default();
            for target in adjacency.outgoing {
                if entry.outgoing.insert(target) {
                    self.edge_count += 1;
                }
            }
            entry.incoming.extend(adjacency.incoming);
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn adjacency(&self, node: NodeId) -> Option<&Adjacency> {
        self.adjacency.get(&node)
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, |a| a.outgoing.len())
    }

    pub fn in_degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, |a| a.incoming.len())
    }

    /// Iterate (node, adjacency) in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Adjacency)> + '_ {
        self.adjacency.iter().map(|(&node, adjacency)| (node, adjacency))
    }

    /// All node ids, ascending
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.adjacency.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// All edges, ascending by (follower, target)
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .adjacency
            .iter()
            .flat_map(|(&follower, a)| a.outgoing.iter().map(move |&t| Edge::new(follower, t)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Targets a node follows and followers it has.
    ///
    /// An unknown node yields empty lists rather than an error.
    pub fn edges_of(&self, node: NodeId) -> NodeEdges {
        let Some(adjacency) = self.adjacency.get(&node) else {
            return NodeEdges {
                node,
                ..NodeEdges::default()
            };
        };

        let mut outgoing: Vec<Edge> = adjacency
            .outgoing
            .iter()
            .map(|&target| Edge::new(node, target))
            .collect();
        let mut incoming: Vec<Edge> = adjacency
            .incoming
            .iter()
            .map(|&follower| Edge::new(follower, node))
            .collect();
        outgoing.sort_unstable();
        incoming.sort_unstable();

        NodeEdges {
            node,
            outgoing,
            incoming,
        }
    }

    /// Subgraph on the given nodes, keeping only edges between them.
    ///
    /// Ids not present in `self` are ignored; kept nodes stay even when all
    /// their edges are dropped.
    pub fn induced_subgraph<I>(&self, nodes: I) -> FollowGraph
    where
        I: IntoIterator<Item = NodeId>,
    {
        let keep: FxHashSet<NodeId> = nodes
            .into_iter()
            .filter(|node| self.adjacency.contains_key(node))
            .collect();

        let mut subgraph = FollowGraph::default();
        for &node in &keep {
            subgraph.insert_node(node);
            for &target in &self.adjacency[&node].outgoing {
                if keep.contains(&target) {
                    subgraph.insert_edge(node, target);
                }
            }
        }
        subgraph
    }

    /// The node together with everyone it follows and everyone following it,
    /// restricted to the edges that touch the node.
    pub fn ego_network(&self, node: NodeId) -> FollowGraph {
        let edges = self.edges_of(node);
        let mut ego = FollowGraph::default();
        for edge in edges.outgoing.iter().chain(&edges.incoming) {
            ego.insert_edge(edge.follower, edge.target);
        }
        ego
    }
}
