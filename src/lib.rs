//! Graph-based keyword extraction and extractive summarization.
//!
//! Two TextRank pipelines share one ranking core:
//!
//! - **Keywords**: content words become vertices, linked when they appear
//!   within a sliding window of each other.
//! - **Summary**: sentences become vertices, linked by normalized lexical
//!   overlap.
//!
//! Both graphs are ranked by iterative score propagation and the top-T
//! vertices are returned. Part-of-speech tagging is injected through the
//! [`Tokenizer`] capability, so the core carries no NLP toolkit.
//!
//! ```
//! use textrank_engine::{extract_keywords, SimpleTokenizer, TextRankConfig};
//!
//! let sentences = [
//!     "Compilers check ownership rules",
//!     "Ownership rules keep memory safe",
//! ];
//! let cfg = TextRankConfig::default().with_top_n(3);
//! let keywords = extract_keywords(&SimpleTokenizer::new("en"), &sentences, &cfg).unwrap();
//! assert_eq!(keywords.len(), 3);
//! ```

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use errors::{ErrorCode, Result, TextRankError};
pub use graph::csr::CsrGraph;
pub use graph::weighted::WeightedGraph;
pub use nlp::stopwords::StopwordFilter;
pub use nlp::tokenizer::{SimpleTokenizer, Tokenizer};
pub use pagerank::propagator::RankPropagator;
pub use pagerank::RankResult;
pub use pipeline::batch::{extract_keywords_batch, summarize_batch};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageReport, StageTimingObserver};
pub use pipeline::runner::{KeywordPipeline, Pipeline, SummaryPipeline};
pub use pipeline::validation::Task;
pub use summarizer::selector::{Selection, TopKSelector};
pub use types::{
    KeySentence, Keyword, PosTag, SentenceOrder, TaggedToken, TextRankConfig, UpdateMode,
};

/// Rank the content words of `sentences` and return the top `cfg.top_n`
/// keywords, best first.
///
/// Windows span sentence boundaries. Fails with
/// [`TextRankError::InvalidParameter`] before any work when the window,
/// damping, epoch or threshold setting is out of range.
pub fn extract_keywords<S, T>(
    tokenizer: &T,
    sentences: &[S],
    cfg: &TextRankConfig,
) -> Result<Vec<Keyword>>
where
    S: AsRef<str>,
    T: Tokenizer + ?Sized,
{
    Pipeline::keywords(cfg.clone()).extract(sentences, tokenizer)
}

/// Rank an already filtered token stream and return the top keywords
pub fn extract_keywords_from_tokens<S: AsRef<str>>(
    tokens: &[S],
    cfg: &TextRankConfig,
) -> Result<Vec<Keyword>> {
    Pipeline::keywords(cfg.clone()).extract_from_tokens(tokens)
}

/// Return the top `cfg.top_n` key sentences in `cfg.sentence_order`.
///
/// The window setting is not consulted. Identical sentences count once and
/// report the index of their first occurrence.
pub fn summarize<S, T>(
    tokenizer: &T,
    sentences: &[S],
    cfg: &TextRankConfig,
) -> Result<Vec<KeySentence>>
where
    S: AsRef<str>,
    T: Tokenizer + ?Sized,
{
    Pipeline::summary(cfg.clone()).summarize(sentences, tokenizer)
}
