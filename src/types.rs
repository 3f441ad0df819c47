//! Core types shared across the engine
//!
//! Tokens, POS tags, configuration and the public result types.

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tag
///
/// Only the distinction the graph builders care about is kept: content
/// words (nouns, verbs, adjectives) versus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Other,
}

impl PosTag {
    /// Map a raw tagger label onto a coarse tag
    ///
    /// Understands both Sejong-style labels (`NNG`, `NNP`, `VV`, `VX`, `VA`)
    /// and Penn Treebank labels (`NN`, `NNS`, `VBD`, `JJ`, ...).
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_uppercase();
        if tag.contains("NN") {
            PosTag::Noun
        } else if tag.contains("VV") || tag.contains("VX") || tag.starts_with("VB") {
            PosTag::Verb
        } else if tag.contains("VA") || tag.starts_with("JJ") {
            PosTag::Adjective
        } else {
            PosTag::Other
        }
    }

    /// Whether tokens with this tag become graph vertices
    pub fn is_content(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Verb | PosTag::Adjective)
    }
}

/// A surface form paired with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PosTag,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }

    /// Build from a raw tagger label (see [`PosTag::from_tag`])
    pub fn from_tag(text: impl Into<String>, tag: &str) -> Self {
        Self::new(text, PosTag::from_tag(tag))
    }
}

/// How the propagator reads neighbor scores within an epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Scores written during an epoch are visible to vertices visited later
    /// in the same epoch (Gauss-Seidel sweep).
    #[default]
    Asynchronous,
    /// Every vertex reads the scores frozen at the start of the epoch
    /// (Jacobi sweep).
    Synchronous,
}

/// Order of the sentences returned by summarization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceOrder {
    /// Descending score
    #[default]
    Ranked,
    /// Selected sentences restored to their position in the input
    Document,
}

/// Configuration for keyword extraction and summarization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Co-occurrence window size, 2..=10 (keywords only)
    pub window_size: usize,
    /// Damping factor, strictly between 0 and 1
    pub damping: f64,
    /// Maximum number of propagation epochs, 20..=30
    pub max_epochs: usize,
    /// Per-vertex convergence threshold
    pub threshold: f64,
    /// Number of results to return
    pub top_n: usize,
    pub update_mode: UpdateMode,
    pub sentence_order: SentenceOrder,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            window_size: 2,
            damping: 0.85,
            max_epochs: 30,
            threshold: 0.001,
            top_n: 20,
            update_mode: UpdateMode::Asynchronous,
            sentence_order: SentenceOrder::Ranked,
        }
    }
}

impl TextRankConfig {
    /// Defaults suited for keyword extraction
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults suited for summarization (three sentences)
    pub fn summary() -> Self {
        Self {
            top_n: 3,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
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

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    pub fn with_sentence_order(mut self, sentence_order: SentenceOrder) -> Self {
        self.sentence_order = sentence_order;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A ranked keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub text: String,
    pub score: f64,
}

/// A ranked sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySentence {
    pub text: String,
    pub score: f64,
    /// Position of the sentence's first occurrence among the distinct input
    /// sentences
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_from_sejong_tags() {
        assert_eq!(PosTag::from_tag("NNP"), PosTag::Noun);
        assert_eq!(PosTag::from_tag("NNG"), PosTag::Noun);
        assert_eq!(PosTag::from_tag("VV"), PosTag::Verb);
        assert_eq!(PosTag::from_tag("VX"), PosTag::Verb);
        assert_eq!(PosTag::from_tag("VA"), PosTag::Adjective);
        assert_eq!(PosTag::from_tag("JKS"), PosTag::Other);
        assert_eq!(PosTag::from_tag("SF"), PosTag::Other);
    }

    #[test]
    fn test_pos_from_penn_tags() {
        assert_eq!(PosTag::from_tag("NNS"), PosTag::Noun);
        assert_eq!(PosTag::from_tag("VBD"), PosTag::Verb);
        assert_eq!(PosTag::from_tag("JJR"), PosTag::Adjective);
        assert_eq!(PosTag::from_tag("DT"), PosTag::Other);
        assert_eq!(PosTag::from_tag("in"), PosTag::Other);
    }

    #[test]
    fn test_content_tags() {
        assert!(PosTag::Noun.is_content());
        assert!(PosTag::Verb.is_content());
        assert!(PosTag::Adjective.is_content());
        assert!(!PosTag::Other.is_content());
    }

    #[test]
    fn test_config_defaults() {
        let cfg = TextRankConfig::default();
        assert_eq!(cfg.window_size, 2);
        assert!((cfg.damping - 0.85).abs() < 1e-12);
        assert_eq!(cfg.max_epochs, 30);
        assert!((cfg.threshold - 0.001).abs() < 1e-12);
        assert_eq!(cfg.top_n, 20);
        assert_eq!(TextRankConfig::summary().top_n, 3);
    }

    #[test]
    fn test_config_from_json_partial() {
        let cfg = TextRankConfig::from_json(
            r#"{"window_size": 4, "update_mode": "synchronous", "sentence_order": "document"}"#,
        )
        .unwrap();
        assert_eq!(cfg.window_size, 4);
        assert_eq!(cfg.update_mode, UpdateMode::Synchronous);
        assert_eq!(cfg.sentence_order, SentenceOrder::Document);
        assert_eq!(cfg.max_epochs, 30);
    }

    #[test]
    fn test_config_from_bad_json() {
        let err = TextRankConfig::from_json("{ not json").unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_config_json_roundtrip_keeps_modes() {
        let cfg = TextRankConfig::summary().with_update_mode(UpdateMode::Synchronous);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"synchronous\""));
        assert_eq!(TextRankConfig::from_json(&json).unwrap(), cfg);
    }
}
