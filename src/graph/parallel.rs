//! Parallel graph construction
//!
//! The edge slice is cut into `worker_count` contiguous chunks. Each worker
//! builds a partial graph from its own chunk on a dedicated rayon pool, sharing
//! nothing with the others. After the join the partials are merged on the
//! calling thread; since [`FollowGraph::merge`] is a set union the result does
//! not depend on where the chunk boundaries fall.
//!
//! A malformed record stops the build early: every worker whose chunk comes
//! after the lowest failing chunk abandons its work, while workers before it
//! run to completion so the reported error is always the lowest-chunk one.

use super::store::{FollowGraph, GraphError, GraphResult};
use super::types::EdgeRecord;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Worker pool size when the caller has no preference
pub const DEFAULT_WORKERS: usize = 4;

/// Records between two checks of the shared failure marker
const FAILURE_CHECK_INTERVAL: usize = 1024;

/// Outcome of one worker
#[derive(Debug)]
enum Partial {
    Built(FollowGraph),
    Failed(GraphError),
    /// Stopped because a lower-numbered chunk failed
    Abandoned,
}

/// Split `len` items into `chunks` contiguous ranges whose sizes differ by at
/// most one, larger ranges first. Ranges may be empty when `len < chunks`.
pub fn chunk_bounds(len: usize, chunks: usize) -> Vec<Range<usize>> {
    if chunks == 0 {
        return Vec::new();
    }

    let base = len / chunks;
    let extra = len % chunks;
    let mut start = 0;
    (0..chunks)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Build a graph from `edges` using `worker_count` workers.
///
/// Produces the same graph as [`FollowGraph::build`] for every worker count.
/// If several chunks contain malformed records, the error of the first such
/// chunk is returned.
pub fn build_parallel<R>(edges: &[R], worker_count: usize) -> GraphResult<FollowGraph>
where
    R: EdgeRecord + Sync,
{
    if worker_count == 0 {
        return Err(GraphError::InvalidWorkerCount);
    }
    if edges.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .thread_name(|i| format!("graph-build-{}", i))
        .build()
        .map_err(|e| GraphError::WorkerPool(e.to_string()))?;

    let bounds = chunk_bounds(edges.len(), worker_count);
    let started = Instant::now();

    // Index of the lowest chunk known to have failed
    let first_failed = AtomicUsize::new(usize::MAX);
    let partials: Vec<Partial> = pool.install(|| {
        bounds
            .par_iter()
            .enumerate()
            .map(|(chunk, range)| build_chunk(edges, range.clone(), chunk, &first_failed))
            .collect()
    });
    debug!(
        workers = worker_count,
        abandoned = partials
            .iter()
            .filter(|p| matches!(p, Partial::Abandoned))
            .count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "partial graphs built"
    );

    // Join barrier passed: merge single-threaded, in chunk order
    let mut merged = FollowGraph::default();
    for partial in partials {
        match partial {
            Partial::Built(graph) => merged.merge(graph),
            Partial::Failed(err) => return Err(err),
            // Only ever follows a failed chunk, which returned above
            Partial::Abandoned => {}
        }
    }

    info!(
        rows = edges.len(),
        nodes = merged.node_count(),
        edges = merged.edge_count(),
        workers = worker_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "follower graph built"
    );
    Ok(merged)
}

/// Build the partial graph of one chunk, giving up as soon as a
/// lower-numbered chunk has failed.
fn build_chunk<R: EdgeRecord>(
    edges: &[R],
    range: Range<usize>,
    chunk: usize,
    first_failed: &AtomicUsize,
) -> Partial {
    let mut graph = FollowGraph::default();
    for (offset, record) in edges[range.clone()].iter().enumerate() {
        if offset % FAILURE_CHECK_INTERVAL == 0 && first_failed.load(Ordering::Relaxed) < chunk {
            return Partial::Abandoned;
        }
        match record.to_edge(range.start + offset) {
            Ok(edge) => {
                graph.insert_edge(edge.follower, edge.target);
            }
            Err(err) => {
                first_failed.fetch_min(chunk, Ordering::Relaxed);
                return Partial::Failed(err);
            }
        }
    }
    Partial::Built(graph)
}
