// crates/repweb-reputation/src/top_k.rs
//
// Bounded selection of the highest-scoring candidates.
//
// Keeps a min-heap of at most `k` entries, so selecting from T candidates
// costs O(T log k) and never sorts the full set.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::node::NodeId;

/// A node and its up-to-date score.
///
/// Ordered by score, ties broken in favour of the earlier-created node, so a
/// greater `Candidate` ranks higher.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub id: NodeId,
    pub score: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Return up to `k` candidates, highest rank first.
pub fn select_top_k<I>(candidates: I, k: usize) -> Vec<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    if k == 0 {
        return Vec::new();
    }

    // Grows with the candidates actually seen; `k` may be far larger.
    let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();
    for candidate in candidates {
        heap.push(Reverse(candidate));
        if heap.len() > k {
            heap.pop();
        }
    }

    // Ascending order of Reverse is descending order of rank.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(candidate)| candidate)
        .collect()
}
