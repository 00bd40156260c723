//! Ranking and truncation shared by every analyzer
//!
//! Order is score descending, then node id ascending, so equal scores
//! always come out in the same order.

use super::common::NodeId;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A value that can be ranked. Floats use IEEE total ordering so NaN never
/// breaks the sort.
pub trait Score: Copy {
    fn rank_cmp(&self, other: &Self) -> Ordering;
}

impl Score for f64 {
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

macro_rules! impl_integer_score {
    ($($t:ty),*) => {
        $(impl Score for $t {
            fn rank_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        })*
    };
}

impl_integer_score!(u32, u64, usize);

fn rank_order<S: Score>(a: &(NodeId, S), b: &(NodeId, S)) -> Ordering {
    b.1.rank_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Top `k` entries, highest score first.
///
/// Returns `min(k, len)` entries; `k = 0` yields nothing.
pub fn top_k<S, I>(scores: I, k: usize) -> Vec<(NodeId, S)>
where
    S: Score,
    I: IntoIterator<Item = (NodeId, S)>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(NodeId, S)> = scores.into_iter().collect();
    if k < entries.len() {
        entries.select_nth_unstable_by(k - 1, rank_order);
        entries.truncate(k);
    }
    entries.sort_unstable_by(rank_order);
    entries
}

pub fn top_k_map<S: Score>(scores: &HashMap<NodeId, S>, k: usize) -> Vec<(NodeId, S)> {
    top_k(scores.iter().map(|(&node, &score)| (node, score)), k)
}
