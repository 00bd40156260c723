//! Ready-made reports over one built graph
//!
//! [`Analysis`] owns a graph and an [`AnalysisConfig`], and produces the ranked
//! tables a front-end renders: most active followers, most followed targets,
//! degree centrality, PageRank, hubs and authorities.

use super::build_view;
use crate::config::{AnalysisConfig, ConfigError};
use crate::graph::{build_parallel, EdgeRecord, FollowGraph, GraphError, NodeId};
use follower_graph_algorithms::{
    degree_centrality, frequency, hits_with, page_rank_with, top_k_map, AlgoError, Convergence,
    Deadline, DegreeStats, FrequencyTable, GraphView,
};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Algo(#[from] AlgoError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Degree distribution of one direction
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub top: Vec<(NodeId, u64)>,
    pub stats: Option<DegreeStats>,
    pub bucket_edges: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub top: Vec<(NodeId, f64)>,
    pub convergence: Convergence,
}

#[derive(Debug, Clone, Serialize)]
pub struct HitsReport {
    pub hubs: Vec<(NodeId, f64)>,
    pub authorities: Vec<(NodeId, f64)>,
    pub convergence: Convergence,
}

/// Reports over one graph.
///
/// The CSR [`GraphView`] is built on the first analyzer call and then kept,
/// so from that point the adjacency is resident twice (hash sets in the graph,
/// CSR arrays in the view). Edge queries through [`Analysis::graph`] never
/// build the view.
pub struct Analysis {
    graph: FollowGraph,
    view: OnceLock<GraphView>,
    config: AnalysisConfig,
}

impl Analysis {
    pub fn new(graph: FollowGraph, config: AnalysisConfig) -> Self {
        Self {
            graph,
            view: OnceLock::new(),
            config,
        }
    }

    /// Validate `config`, build the graph with `config.workers` workers and
    /// wrap it.
    pub fn from_records<R>(edges: &[R], config: AnalysisConfig) -> Result<Self, AnalysisError>
    where
        R: EdgeRecord + Sync,
    {
        config.validate()?;
        let graph = build_parallel(edges, config.workers)?;
        Ok(Self::new(graph, config))
    }

    pub fn graph(&self) -> &FollowGraph {
        &self.graph
    }

    pub fn view(&self) -> &GraphView {
        self.view.get_or_init(|| build_view(&self.graph))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn most_active_followers(&self) -> FrequencyReport {
        self.frequency_report(frequency::out_degree_frequency(self.view()))
    }

    pub fn most_followed_targets(&self) -> FrequencyReport {
        self.frequency_report(frequency::in_degree_frequency(self.view()))
    }

    fn frequency_report(&self, table: FrequencyTable) -> FrequencyReport {
        FrequencyReport {
            top: table.top(self.config.top),
            stats: table.stats(),
            bucket_edges: table.log_bucket_edges(self.config.buckets),
        }
    }

    pub fn top_degree_centrality(&self) -> Vec<(NodeId, f64)> {
        top_k_map(&degree_centrality(self.view()), self.config.top)
    }

    pub fn top_page_rank(&self) -> Result<RankingReport, AnalysisError> {
        let result = page_rank_with(self.view(), self.config.pagerank, &self.deadline())?;
        report_convergence("pagerank", result.convergence);
        Ok(RankingReport {
            top: result.top(self.config.top),
            convergence: result.convergence,
        })
    }

    pub fn top_hits(&self) -> Result<HitsReport, AnalysisError> {
        let result = hits_with(self.view(), self.config.hits, &self.deadline())?;
        report_convergence("hits", result.convergence);
        Ok(HitsReport {
            hubs: result.top_hubs(self.config.top),
            authorities: result.top_authorities(self.config.top),
            convergence: result.convergence,
        })
    }

    /// Starts the clock for one solver run
    fn deadline(&self) -> Option<Deadline> {
        self.config.time_budget().map(Deadline::after)
    }
}

fn report_convergence(solver: &str, convergence: Convergence) {
    match convergence {
        Convergence::Converged { iterations } => {
            info!(solver, iterations, "solver converged");
        }
        Convergence::NotReached {
            iterations,
            residual,
        } => {
            warn!(
                solver,
                iterations,
                residual,
                "iteration cap reached before tolerance; returning last iterate"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_on_cycle() {
        let edges = vec![(1u64, 2u64), (2, 3), (3, 1)];
        let analysis = Analysis::from_records(&edges, AnalysisConfig::default()).unwrap();

        let followers = analysis.most_active_followers();
        assert_eq!(followers.top, vec![(1, 1), (2, 1), (3, 1)]);
        assert_eq!(followers.bucket_edges, vec![1.0, 1.0]);
        assert_eq!(followers.stats.unwrap().mean, 1.0);

        let centrality = analysis.top_degree_centrality();
        assert_eq!(centrality, vec![(1, 1.0), (2, 1.0), (3, 1.0)]);

        let ranking = analysis.top_page_rank().unwrap();
        assert!(ranking.convergence.is_converged());
        assert_eq!(ranking.top.len(), 3);
    }

    #[test]
    fn test_view_built_on_first_analyzer_call() {
        let edges = vec![(1u64, 2u64), (2, 3)];
        let analysis = Analysis::from_records(&edges, AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.graph().edges_of(2).incoming.len(), 1);
        assert!(analysis.view.get().is_none());

        analysis.most_followed_targets();
        assert_eq!(analysis.view.get().map(GraphView::edge_count), Some(2));
    }

    #[test]
    fn test_from_records_validates_config() {
        let edges = vec![(1u64, 2u64)];
        let config = AnalysisConfig {
            top: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            Analysis::from_records(&edges, config),
            Err(AnalysisError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_huge_budget_runs_without_deadline() {
        let edges = vec![(1u64, 2u64), (2, 3), (3, 1)];

        // Representable as a Duration but far past any Instant
        let config = AnalysisConfig::from_yaml_str("time_budget_secs: 1.0e18").unwrap();
        let analysis = Analysis::from_records(&edges, config).unwrap();
        assert!(analysis.top_page_rank().unwrap().convergence.is_converged());
        assert!(analysis.top_hits().is_ok());

        // Skipping validation must not panic either
        let unchecked = AnalysisConfig {
            time_budget_secs: Some(1.0e30),
            ..AnalysisConfig::default()
        };
        let analysis = Analysis::new(FollowGraph::build(&edges).unwrap(), unchecked);
        assert!(analysis.top_page_rank().is_ok());
    }

    #[test]
    fn test_exhausted_budget_interrupts() {
        let edges = vec![(1u64, 2u64), (2, 1)];
        let config = AnalysisConfig {
            time_budget_secs: Some(1e-9),
            ..AnalysisConfig::default()
        };
        let analysis = Analysis::from_records(&edges, config).unwrap();

        assert!(matches!(
            analysis.top_hits(),
            Err(AnalysisError::Algo(AlgoError::Interrupted { .. }))
        ));
    }
}
