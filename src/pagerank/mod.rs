//! Rank propagation
//!
//! This module provides the iterative TextRank solver and its result type.

pub mod propagator;

/// Result of a rank propagation run
///
/// Scores are stored in vertex insertion order, which is also the order used
/// to break ties when ranking.
#[derive(Debug, Clone)]
pub struct RankResult<V> {
    /// Vertices, in insertion order
    pub vertices: Vec<V>,
    /// Score for each vertex (same indexing as `vertices`)
    pub scores: Vec<f64>,
    /// Number of epochs performed
    pub epochs: usize,
    /// Whether every vertex was within threshold in the last epoch
    pub converged: bool,
    /// Largest per-vertex change in the last epoch
    pub delta: f64,
}

impl<V> RankResult<V> {
    /// Create a new rank result
    pub fn new(vertices: Vec<V>, scores: Vec<f64>, epochs: usize, converged: bool, delta: f64) -> Self {
        Self {
            vertices,
            scores,
            epochs,
            converged,
            delta,
        }
    }

    /// An empty result (no vertices, no epochs)
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), 0, true, 0.0)
    }

    /// Number of scored vertices
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate over `(vertex, score)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> {
        self.vertices.iter().zip(self.scores.iter().copied())
    }
}

impl<V: PartialEq> RankResult<V> {
    /// Get the score for a specific vertex
    pub fn score(&self, vertex: &V) -> Option<f64> {
        self.vertices
            .iter()
            .position(|v| v == vertex)
            .map(|i| self.scores[i])
    }
}
