//! Degree-frequency analysis
//!
//! How many targets each follower follows (out-degree) and how many followers
//! each target has (in-degree), plus summary statistics and logarithmic
//! histogram bucket edges for the distribution plots.

use super::common::{GraphView, NodeId};
use super::topk::top_k;
use std::collections::HashMap;

/// Number of histogram bucket edges used when the caller has no preference
pub const DEFAULT_BUCKETS: usize = 50;

/// Node id -> count. Only nodes with a nonzero count are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    counts: HashMap<NodeId, u64>,
}

/// Descriptive statistics over the counts of a [`FrequencyTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1). Zero for a single observation.
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl FrequencyTable {
    /// Build a table from (node, count) pairs, dropping zero counts
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, u64)>,
    {
        Self {
            counts: counts.into_iter().filter(|&(_, count)| count > 0).collect(),
        }
    }

    pub fn get(&self, node: NodeId) -> Option<u64> {
        self.counts.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, u64)> + '_ {
        self.counts.iter().map(|(&node, &count)| (node, count))
    }

    /// The `n` most frequent nodes, ties broken by ascending node id
    pub fn top(&self, n: usize) -> Vec<(NodeId, u64)> {
        top_k(self.iter(), n)
    }

    pub fn stats(&self) -> Option<DegreeStats> {
        if self.counts.is_empty() {
            return None;
        }

        let mut values: Vec<f64> = self.counts.values().map(|&c| c as f64).collect();
        values.sort_unstable_by(f64::total_cmp);

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squared / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(DegreeStats {
            count,
            mean,
            std,
            min: values[0],
            p25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            p75: quantile(&values, 0.75),
            max: values[count - 1],
        })
    }

    /// `buckets` edges spaced evenly in log10 between the smallest and the
    /// largest count.
    ///
    /// When every count is equal the distribution collapses into the single
    /// bucket `[min, max]`.
    pub fn log_bucket_edges(&self, buckets: usize) -> Vec<f64> {
        let (Some(&min), Some(&max)) = (self.counts.values().min(), self.counts.values().max())
        else {
            return Vec::new();
        };
        if buckets == 0 {
            return Vec::new();
        }

        let (min, max) = (min as f64, max as f64);
        if min == max {
            return vec![min, max];
        }
        if buckets == 1 {
            return vec![min];
        }

        let (lo, hi) = (min.log10(), max.log10());
        let step = (hi - lo) / (buckets - 1) as f64;
        let mut edges: Vec<f64> = (0..buckets)
            .map(|i| 10f64.powf(lo + step * i as f64))
            .collect();
        // pin the ends against rounding in powf
        edges[0] = min;
        edges[buckets - 1] = max;
        edges
    }
}

/// Linear interpolation between closest ranks
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

/// Counts by follower: the number of distinct targets each node follows
pub fn out_degree_frequency(view: &GraphView) -> FrequencyTable {
    FrequencyTable::from_counts(
        (0..view.node_count).map(|idx| (view.index_to_node[idx], view.out_degree(idx) as u64)),
    )
}

/// Counts by target: the number of distinct followers each node has
pub fn in_degree_frequency(view: &GraphView) -> FrequencyTable {
    FrequencyTable::from_counts(
        (0..view.node_count).map(|idx| (view.index_to_node[idx], view.in_degree(idx) as u64)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan_view() -> GraphView {
        // 1 follows 2, 3, 4; 2 follows 3; 5 follows 3
        GraphView::from_edges(vec![(1, 2), (1, 3), (1, 4), (2, 3), (5, 3)])
    }

    #[test]
    fn test_out_degree_frequency() {
        let table = out_degree_frequency(&fan_view());

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some(3));
        assert_eq!(table.get(2), Some(1));
        assert_eq!(table.get(5), Some(1));
        // pure targets never show up as followers
        assert_eq!(table.get(3), None);
        assert_eq!(table.top(2), vec![(1, 3), (2, 1)]);
    }

    #[test]
    fn test_in_degree_frequency() {
        let table = in_degree_frequency(&fan_view());

        assert_eq!(table.get(3), Some(3));
        assert_eq!(table.get(1), None);
        assert_eq!(table.top(10), vec![(3, 3), (2, 1), (4, 1)]);
    }

    #[test]
    fn test_stats_match_describe() {
        let table = FrequencyTable::from_counts(vec![(1, 1), (2, 2), (3, 3), (4, 4)]);
        let stats = table.stats().unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.std - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.p25, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.p75, 3.25);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_stats_single_and_empty() {
        assert!(FrequencyTable::default().stats().is_none());

        let stats = FrequencyTable::from_counts(vec![(9, 5)]).stats().unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_log_bucket_edges() {
        let table = FrequencyTable::from_counts(vec![(1, 1), (2, 10), (3, 100)]);
        let edges = table.log_bucket_edges(3);

        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], 1.0);
        assert!((edges[1] - 10.0).abs() < 1e-9);
        assert_eq!(edges[2], 100.0);

        let edges = table.log_bucket_edges(DEFAULT_BUCKETS);
        assert_eq!(edges.len(), DEFAULT_BUCKETS);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_bucket_edges_degenerate() {
        let flat = FrequencyTable::from_counts(vec![(1, 4), (2, 4)]);
        assert_eq!(flat.log_bucket_edges(DEFAULT_BUCKETS), vec![4.0, 4.0]);
        assert!(FrequencyTable::default().log_bucket_edges(10).is_empty());
    }
}
