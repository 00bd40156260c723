//! PageRank algorithm implementation
//!
//! Power iteration with uniform teleport. Dangling nodes (no outgoing edges)
//! spread their whole rank evenly over every node, so the vector stays a
//! probability distribution on every iterate.

use super::common::{AlgoError, AlgoResult, Convergence, GraphView, NodeId};
use super::interrupt::{Interrupt, Never};
use super::topk::top_k_map;
use std::collections::HashMap;
use tracing::debug;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Per-node tolerance; the solve stops once the L1 change drops below N * tolerance
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> AlgoResult<()> {
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(AlgoError::InvalidParameter(format!(
                "damping factor must be within [0, 1], got {}",
                self.damping_factor
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(AlgoError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Rank vector plus how the solve ended
#[derive(Debug, Clone)]
pub struct PageRankResult {
    pub scores: HashMap<NodeId, f64>,
    pub convergence: Convergence,
}

impl PageRankResult {
    pub fn top(&self, k: usize) -> Vec<(NodeId, f64)> {
        top_k_map(&self.scores, k)
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> AlgoResult<PageRankResult> {
    page_rank_with(view, config, &Never)
}

/// Calculate PageRank, polling `interrupt` before every iteration
pub fn page_rank_with<I: Interrupt + ?Sized>(
    view: &GraphView,
    config: PageRankConfig,
    interrupt: &I,
) -> AlgoResult<PageRankResult> {
    view.ensure_non_empty()?;
    config.validate()?;

    let n = view.node_count;
    let nf = n as f64;

    // 1. Initialize scores uniformly
    let mut scores = vec![1.0 / nf; n];
    let mut next_scores = vec![0.0; n];

    // 2. Precompute 1/out_degree and the dangling set
    let inv_out_degree: Vec<f64> = (0..n)
        .map(|i| match view.out_degree(i) {
            0 => 0.0,
            d => 1.0 / d as f64,
        })
        .collect();
    let dangling: Vec<usize> = (0..n).filter(|&i| view.out_degree(i) == 0).collect();

    // 3. Iteration
    let d = config.damping_factor;
    let threshold = nf * config.tolerance;
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

        let dangling_mass: f64 = dangling.iter().map(|&i| scores[i]).sum();
        let base_score = (1.0 - d) / nf + d * dangling_mass / nf;
        let mut total_diff = 0.0;

        for i in 0..n {
            let mut sum_incoming = 0.0;

            // Iterate over incoming edges
            for &source_idx in view.predecessors(i) {
                sum_incoming += scores[source_idx] * inv_out_degree[source_idx];
            }

            next_scores[i] = base_score + d * sum_incoming;
            total_diff += (next_scores[i] - scores[i]).abs();
        }

        // Swap buffers
        std::mem::swap(&mut scores, &mut next_scores);

        // Check convergence
        if total_diff < threshold {
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
        "pagerank finished"
    );

    // 4. Map back to NodeIds
    Ok(PageRankResult {
        scores: view.to_node_map(scores),
        convergence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    fn total(result: &PageRankResult) -> f64 {
        result.scores.values().sum()
    }

    #[test]
    fn test_cycle_is_uniform() {
        let view = GraphView::from_edges(vec![(1, 2), (2, 3), (3, 1)]);
        let result = page_rank(&view, PageRankConfig::default()).unwrap();

        assert!(result.convergence.is_converged());
        for node in [1, 2, 3] {
            assert!((result.scores[&node] - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_star_center_ranks_highest() {
        // followers 1, 2, 3 all follow 10; 10 is dangling
        let view = GraphView::from_edges(vec![(1, 10), (2, 10), (3, 10)]);
        let result = page_rank(&view, PageRankConfig::default()).unwrap();

        let center = result.scores[&10];
        for follower in [1, 2, 3] {
            assert!(center > result.scores[&follower]);
        }
        assert!((total(&result) - 1.0).abs() < 1e-6);
        assert_eq!(result.top(1)[0].0, 10);
    }

    #[test]
    fn test_dangling_mass_is_kept() {
        // 1 -> 2 -> 3, 1 -> 4, 3 and 4 dangling, plus a self-loop on 5
        let view = GraphView::from_edges(vec![(1, 2), (2, 3), (1, 4), (5, 5)]);
        let result = page_rank(&view, PageRankConfig::default()).unwrap();

        assert!((total(&result) - 1.0).abs() < 1e-6);
        assert!(result.scores.values().all(|&s| s > 0.0));
    }

    #[test]
    fn test_iteration_cap_returns_last_iterate() {
        let view = GraphView::from_edges(vec![(1, 2), (2, 3), (1, 3), (3, 4)]);
        let config = PageRankConfig {
            max_iterations: 2,
            tolerance: 1e-12,
            ..PageRankConfig::default()
        };
        let result = page_rank(&view, config).unwrap();

        match result.convergence {
            Convergence::NotReached { iterations, residual } => {
                assert_eq!(iterations, 2);
                assert!(residual > 0.0);
            }
            other => panic!("expected NotReached, got {:?}", other),
        }
        assert!((total(&result) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_interrupt_aborts() {
        let view = GraphView::from_edges(vec![(1, 2), (2, 1)]);
        let stop = AtomicBool::new(true);

        let err = page_rank_with(&view, PageRankConfig::default(), &stop).unwrap_err();
        assert_eq!(err, AlgoError::Interrupted { iterations: 0 });
    }

    #[test]
    fn test_rejects_empty_and_bad_config() {
        let empty = GraphView::from_edges(Vec::new());
        assert_eq!(
            page_rank(&empty, PageRankConfig::default()).unwrap_err(),
            AlgoError::EmptyGraph
        );

        let view = GraphView::from_edges(vec![(1, 2)]);
        let config = PageRankConfig {
            damping_factor: 1.5,
            ..PageRankConfig::default()
        };
        assert!(matches!(
            page_rank(&view, config),
            Err(AlgoError::InvalidParameter(_))
        ));
    }
}
