//! TextRank score propagation
//!
//! Implements the TextRank fixed-point iteration:
//!
//! ```text
//! score(j) = (1 - d) + d * Σ_{k ∈ N(j)} score(k) * w(j, k) / |N(k)|
//! ```
//!
//! Scores start at 1.0 and are not normalized. Each neighbor's contribution
//! is divided by its neighbor count, not by its total edge weight. In the
//! default asynchronous mode a score written during an epoch is read by
//! every vertex visited after it in the same epoch.

use super::RankResult;
use crate::errors::{Result, TextRankError};
use crate::graph::csr::CsrGraph;
use crate::types::{TextRankConfig, UpdateMode};
use std::hash::Hash;

/// Smallest accepted epoch bound
pub const MIN_EPOCHS: usize = 20;
/// Largest accepted epoch bound
pub const MAX_EPOCHS: usize = 30;

/// Check damping, epoch bound and threshold ranges
pub fn check_rank_params(damping: f64, max_epochs: usize, threshold: f64) -> Result<()> {
    if !(damping > 0.0 && damping < 1.0) {
        return Err(TextRankError::invalid_parameter(
            "damping",
            format!("must be in (0, 1), got {damping}"),
        ));
    }
    if !(MIN_EPOCHS..=MAX_EPOCHS).contains(&max_epochs) {
        return Err(TextRankError::invalid_parameter(
            "max_epochs",
            format!("must be in [{MIN_EPOCHS}, {MAX_EPOCHS}], got {max_epochs}"),
        ));
    }
    if !(threshold > 0.0 && threshold.is_finite()) {
        return Err(TextRankError::invalid_parameter(
            "threshold",
            format!("must be a positive finite number, got {threshold}"),
        ));
    }
    Ok(())
}

/// Iterative TextRank solver
#[derive(Debug, Clone)]
pub struct RankPropagator {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of epochs
    pub max_epochs: usize,
    /// Per-vertex convergence threshold
    pub threshold: f64,
    /// In-place (Gauss-Seidel) or previous-epoch (Jacobi) reads
    pub mode: UpdateMode,
}

impl Default for RankPropagator {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_epochs: 30,
            threshold: 0.001,
            mode: UpdateMode::Asynchronous,
        }
    }
}

impl RankPropagator {
    /// Create a propagator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a propagator from the ranking fields of a config
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        Self {
            damping: cfg.damping,
            max_epochs: cfg.max_epochs,
            threshold: cfg.threshold,
            mode: cfg.update_mode,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_mode(mut self, mode: UpdateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the parameters, then propagate
    pub fn run<V>(&self, graph: &CsrGraph<V>) -> Result<RankResult<V>>
    where
        V: Eq + Hash + Clone + std::fmt::Debug,
    {
        check_rank_params(self.damping, self.max_epochs, self.threshold)?;
        Ok(self.propagate(graph, self.max_epochs))
    }

    /// Propagate for at most `epochs` epochs without validating parameters
    ///
    /// Used to observe intermediate states; `run` is the checked entry point.
    pub(crate) fn propagate<V: Clone>(&self, graph: &CsrGraph<V>, epochs: usize) -> RankResult<V> {
        let n = graph.num_nodes;
        if n == 0 {
            return RankResult::empty();
        }

        let d = self.damping;
        let mut scores = vec![1.0; n];
        let mut previous = match self.mode {
            UpdateMode::Synchronous => scores.clone(),
            UpdateMode::Asynchronous => Vec::new(),
        };

        let mut epoch = 0;
        let mut converged = false;
        let mut delta = 0.0_f64;

        while epoch < epochs {
            epoch += 1;
            if self.mode == UpdateMode::Synchronous {
                previous.copy_from_slice(&scores);
            }

            let mut settled = 0;
            delta = 0.0;

            for j in 0..n {
                let read = match self.mode {
                    UpdateMode::Asynchronous => &scores,
                    UpdateMode::Synchronous => &previous,
                };

                let inflow: f64 = graph
                    .neighbors(j as u32)
                    .map(|(k, w)| read[k as usize] * w / graph.degree(k) as f64)
                    .sum();
                let new_score = (1.0 - d) + d * inflow;

                let change = (scores[j] - new_score).abs();
                if change <= self.threshold {
                    settled += 1;
                }
                delta = delta.max(change);

                scores[j] = new_score;
            }

            if settled == n {
                converged = true;
                #[cfg(feature = "tracing")]
                tracing::debug!(epoch, nodes = n, "rank propagation converged");
                break;
            }
        }

        if !converged {
            #[cfg(feature = "tracing")]
            tracing::debug!(epochs = epoch, delta, "rank propagation hit epoch bound");
        }

        RankResult::new(graph.vertices.clone(), scores, epoch, converged, delta)
    }
}
