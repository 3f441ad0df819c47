//! Top-T selection over rank results
//!
//! Ordering is by descending score; equal scores keep vertex insertion
//! order (ascending index). NaN scores sort after every number.

use crate::pagerank::RankResult;
use crate::types::SentenceOrder;
use std::cmp::Ordering;

/// A selected vertex with its score and insertion index
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<V> {
    /// Insertion index of the vertex in the ranked graph
    pub index: usize,
    pub vertex: V,
    pub score: f64,
}

/// Deterministic top-T selector
#[derive(Debug, Clone, Copy)]
pub struct TopKSelector {
    top_n: usize,
    order: SentenceOrder,
}

impl TopKSelector {
    /// Select the `top_n` best vertices in score order
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            order: SentenceOrder::Ranked,
        }
    }

    /// Set the order of the returned selection
    pub fn with_order(mut self, order: SentenceOrder) -> Self {
        self.order = order;
        self
    }

    /// Rank every index of `scores`, best first
    pub fn rank_indices(scores: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..scores.len()).collect();
        // stable: ties keep ascending index
        indices.sort_by(|&a, &b| descending(scores[a], scores[b]));
        indices
    }

    /// Pick the top entries of a rank result
    ///
    /// Returns every vertex exactly once when `top_n` exceeds the vertex
    /// count, and nothing when `top_n` is 0. With [`SentenceOrder::Document`]
    /// the truncated selection is re-sorted by insertion index.
    pub fn select<V: Clone>(&self, result: &RankResult<V>) -> Vec<Selection<V>> {
        if self.top_n == 0 {
            return Vec::new();
        }

        let mut picked = Self::rank_indices(&result.scores);
        picked.truncate(self.top_n);
        if self.order == SentenceOrder::Document {
            picked.sort_unstable();
        }

        picked
            .into_iter()
            .map(|i| Selection {
                index: i,
                vertex: result.vertices[i].clone(),
                score: result.scores[i],
            })
            .collect()
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
