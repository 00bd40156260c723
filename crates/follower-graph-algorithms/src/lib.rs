pub mod common;
pub mod interrupt;
pub mod topk;
pub mod frequency;
pub mod centrality;
pub mod pagerank;
pub mod hits;

pub use common::{AlgoError, AlgoResult, Convergence, GraphView, NodeId};
pub use interrupt::{Deadline, Interrupt, Never};
pub use topk::{top_k, top_k_map, Score};
pub use frequency::{DegreeStats, FrequencyTable, DEFAULT_BUCKETS};
pub use centrality::{degree_centrality, CentralityTable};
pub use pagerank::{page_rank, page_rank_with, PageRankConfig, PageRankResult};
pub use hits::{hits, hits_with, HitsConfig, HitsResult};
