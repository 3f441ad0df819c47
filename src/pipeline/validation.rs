//! Validation engine for ranking configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`TextRankConfig`] and collects every diagnostic into a
//! [`ValidationReport`]; it never short-circuits on the first error, so
//! callers see all problems at once. [`TextRankConfig::validate`] is the
//! fail-fast wrapper used before any graph work starts.
//!
//! # Quick start
//!
//! ```rust
//! use textrank_engine::pipeline::validation::{Task, ValidationEngine};
//! use textrank_engine::TextRankConfig;
//!
//! let cfg = TextRankConfig::default().with_window_size(12);
//! let report = ValidationEngine::with_defaults().validate(&cfg, Task::Keywords);
//! assert!(report.has_errors());
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use serde::Serialize;

use crate::errors::{ErrorCode, Result, TextRankError};
use crate::graph::builder::{MAX_WINDOW, MIN_WINDOW};
use crate::pagerank::propagator::{MAX_EPOCHS, MIN_EPOCHS};
use crate::types::TextRankConfig;

// ─── Task ───────────────────────────────────────────────────────────────────

/// Which operation a configuration is validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Co-occurrence graph over tokens; the window is consulted
    Keywords,
    /// Similarity graph over sentences; the window is ignored
    Summary,
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    /// JSON pointer to the offending field (e.g. `/damping`)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationDiagnostic {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: ErrorCode::InvalidParameter,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(path, message)
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Field name without the leading `/`
    pub fn field(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

impl std::fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Convert the first error into a [`TextRankError::InvalidParameter`]
    pub fn into_result(self) -> Result<()> {
        match self.errors().next() {
            Some(d) => Err(TextRankError::invalid_parameter(d.field(), d.message.clone())),
            None => Ok(()),
        }
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a config and returns zero or more
/// diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so a long-lived engine can be
/// shared across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"window_range"`).
    fn name(&self) -> &str;

    /// Inspect `cfg` for `task` and return any findings.
    fn validate(&self, cfg: &TextRankConfig, task: Task) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(WindowRangeRule));
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(EpochRangeRule));
        engine.add_rule(Box::new(ThresholdRule));
        engine.add_rule(Box::new(EmptySelectionRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `cfg` and return the collected report.
    pub fn validate(&self, cfg: &TextRankConfig, task: Task) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(cfg, task));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TextRankConfig {
    /// Fail fast on the first invalid parameter for `task`
    ///
    /// Warnings are logged, not returned.
    pub fn validate(&self, task: Task) -> Result<()> {
        let report = ValidationEngine::with_defaults().validate(self, task);
        #[cfg(feature = "tracing")]
        log_warnings(&report);
        report.into_result()
    }
}

#[cfg(feature = "tracing")]
fn log_warnings(report: &ValidationReport) {
    for warning in report.warnings() {
        tracing::warn!(path = %warning.path, "{}", warning.message);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. window in [2, 10] (keywords only) ───────────────────────────────────

struct WindowRangeRule;

impl ValidationRule for WindowRangeRule {
    fn name(&self) -> &str {
        "window_range"
    }

    fn validate(&self, cfg: &TextRankConfig, task: Task) -> Vec<ValidationDiagnostic> {
        if task != Task::Keywords || (MIN_WINDOW..=MAX_WINDOW).contains(&cfg.window_size) {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            "/window_size",
            format!(
                "must be in [{MIN_WINDOW}, {MAX_WINDOW}], got {}",
                cfg.window_size
            ),
        )
        .with_hint("2 links adjacent content words; larger windows link more distant ones")]
    }
}

// ─── 2. damping in (0, 1) ───────────────────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, cfg: &TextRankConfig, _task: Task) -> Vec<ValidationDiagnostic> {
        if cfg.damping > 0.0 && cfg.damping < 1.0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            "/damping",
            format!("must be in (0, 1), got {}", cfg.damping),
        )
        .with_hint("0.85 is the usual choice")]
    }
}

// ─── 3. epochs in [20, 30] ──────────────────────────────────────────────────

struct EpochRangeRule;

impl ValidationRule for EpochRangeRule {
    fn name(&self) -> &str {
        "epoch_range"
    }

    fn validate(&self, cfg: &TextRankConfig, _task: Task) -> Vec<ValidationDiagnostic> {
        if (MIN_EPOCHS..=MAX_EPOCHS).contains(&cfg.max_epochs) {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            "/max_epochs",
            format!(
                "must be in [{MIN_EPOCHS}, {MAX_EPOCHS}], got {}",
                cfg.max_epochs
            ),
        )]
    }
}

// ─── 4. threshold positive and finite ───────────────────────────────────────

struct ThresholdRule;

impl ValidationRule for ThresholdRule {
    fn name(&self) -> &str {
        "threshold_positive"
    }

    fn validate(&self, cfg: &TextRankConfig, _task: Task) -> Vec<ValidationDiagnostic> {
        if cfg.threshold > 0.0 && cfg.threshold.is_finite() {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            "/threshold",
            format!("must be a positive finite number, got {}", cfg.threshold),
        )
        .with_hint("0.001 is the usual choice")]
    }
}

// ─── 5. top_n == 0 yields nothing (warning) ─────────────────────────────────

struct EmptySelectionRule;

impl ValidationRule for EmptySelectionRule {
    fn name(&self) -> &str {
        "empty_selection"
    }

    fn validate(&self, cfg: &TextRankConfig, _task: Task) -> Vec<ValidationDiagnostic> {
        if cfg.top_n > 0 {
            return vec![];
        }
        vec![ValidationDiagnostic::warning(
            "/top_n",
            "top_n is 0, the result will always be empty",
        )]
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
