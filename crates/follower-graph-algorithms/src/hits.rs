//! HITS (hubs and authorities)
//!
//! Mutual reinforcement: a node is a good authority when good hubs follow it,
//! and a good hub when it follows good authorities. Both vectors are
//! rescaled to unit Euclidean norm after every round.

use super::common::{AlgoError, AlgoResult, Convergence, GraphView, NodeId};
use super::interrupt::{Interrupt, Never};
use super::topk::top_k_map;
use std::collections::HashMap;
use tracing::debug;

/// HITS configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitsConfig {
    pub max_iterations: usize,
    /// Bound on the summed absolute change of both vectors
    pub tolerance: f64,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-8,
        }
    }
}

impl HitsConfig {
    pub fn validate(&self) -> AlgoResult<()> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(AlgoError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct HitsResult {
    pub hubs: HashMap<NodeId, f64>,
    pub authorities: HashMap<NodeId, f64>,
    pub convergence: Convergence,
}

impl HitsResult {
    pub fn top_hubs(&self, k: usize) -> Vec<(NodeId, f64)> {
        top_k_map(&self.hubs, k)
    }

    pub fn top_authorities(&self, k: usize) -> Vec<(NodeId, f64)> {
        top_k_map(&self.authorities, k)
    }
}

/// Scale to unit L2 norm. An all-zero vector (no edges to propagate over)
/// becomes the uniform unit vector.
fn normalize(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        values.iter_mut().for_each(|v| *v /= norm);
    } else {
        let uniform = 1.0 / (values.len() as f64).sqrt();
        values.iter_mut().for_each(|v| *v = uniform);
    }
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

pub fn hits(view: &GraphView, config: HitsConfig) -> AlgoResult<HitsResult> {
    hits_with(view, config, &Never)
}

/// Calculate hub and authority scores, polling `interrupt` before every iteration
pub fn hits_with<I: Interrupt + ?Sized>(
    view: &GraphView,
    config: HitsConfig,
    interrupt: &I,
) -> AlgoResult<HitsResult> {
    view.ensure_non_empty()?;
    config.validate()?;

    let n = view.node_count;

    // All-ones start, already scaled to unit norm
    let uniform = 1.0 / (n as f64).sqrt();
    let mut hubs = vec![uniform; n];
    let mut authorities = vec![uniform; n];
    let mut next_hubs = vec![0.0; n];
    let mut next_authorities = vec![0.0; n];

    let mut convergence = Convergence::NotReached {
        iterations: 0,
        residual: f64::INFINITY,
    };

    for iteration in 1..=config.max_iterations {
        if interrupt.is_interrupted() {
            return Err(AlgoError::Interrupted {
                iterations: iteration - 1,
            });
        }

        // authority(v) = sum of hub(u) over followers u of v
        for v in 0..n {
            next_authorities[v] = view.predecessors(v).iter().map(|&u| hubs[u]).sum();
        }
        // hub(v) = sum of the fresh authority(w) over targets w of v
        for v in 0..n {
            next_hubs[v] = view
                .successors(v)
                .iter()
                .map(|&w| next_authorities[w])
                .sum();
        }

        normalize(&mut next_authorities);
        normalize(&mut next_hubs);

        let total_diff =
            l1_distance(&next_hubs, &hubs) + l1_distance(&next_authorities, &authorities);

        std::mem::swap(&mut hubs, &mut next_hubs);
        std::mem::swap(&mut authorities, &mut next_authorities);

        if total_diff < config.tolerance {
            convergence = Convergence::Converged {
                iterations: iteration,
            };
            break;
        }
        convergence = Convergence::NotReached {
            iterations: iteration,
            residual: total_diff,
        };
    }

    debug!(
        nodes = n,
        iterations = convergence.iterations(),
        converged = convergence.is_converged(),
        "hits finished"
    );

    Ok(HitsResult {
        hubs: view.to_node_map(hubs),
        authorities: view.to_node_map(authorities),
        convergence,
    })
}
