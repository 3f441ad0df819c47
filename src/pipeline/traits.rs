//! Stage trait definitions for the pipeline.
//!
//! The only stage that varies between keyword extraction and summarization is
//! graph construction; ranking and selection are shared. Implementations are
//! statically dispatched.

use crate::errors::Result;
use crate::graph::builder::{cooccurrence_graph, similarity_graph};
use crate::graph::weighted::WeightedGraph;
use crate::nlp::tokenizer::{content_words, Tokenizer};
use crate::pipeline::validation::Task;
use crate::types::TextRankConfig;

/// Builds the graph a pipeline ranks.
///
/// # Contract
///
/// - **Input**: the caller's sentences, the injected tokenizer, and an
///   already validated config.
/// - **Output**: a symmetric [`WeightedGraph`] whose vertex insertion order is
///   the order of first appearance in the input.
/// - Empty input yields an empty graph, not an error.
pub trait GraphStrategy {
    /// Which validation rules apply to this strategy
    fn task(&self) -> Task;

    /// Build the graph
    fn build<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        cfg: &TextRankConfig,
    ) -> Result<WeightedGraph<String>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized;
}

/// Content words linked by sliding-window proximity (keyword extraction).
///
/// All sentences are flattened into one token stream, so windows cross
/// sentence boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooccurrenceStrategy;

impl GraphStrategy for CooccurrenceStrategy {
    fn task(&self) -> Task {
        Task::Keywords
    }

    fn build<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        cfg: &TextRankConfig,
    ) -> Result<WeightedGraph<String>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        let tokens: Vec<String> = sentences
            .iter()
            .flat_map(|s| content_words(tokenizer, s.as_ref()))
            .collect();
        cooccurrence_graph(&tokens, cfg.window_size)
    }
}

/// Sentences linked by normalized lexical overlap (summarization).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityStrategy;

impl GraphStrategy for SimilarityStrategy {
    fn task(&self) -> Task {
        Task::Summary
    }

    fn build<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        _cfg: &TextRankConfig,
    ) -> Result<WeightedGraph<String>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        Ok(similarity_graph(sentences, tokenizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PosTag, TaggedToken};

    fn nouns(sentence: &str) -> Vec<TaggedToken> {
        sentence
            .split_whitespace()
            .map(|w| TaggedToken::new(w, PosTag::Noun))
            .collect()
    }

    #[test]
    fn test_cooccurrence_flattens_sentences() {
        let cfg = TextRankConfig::default();
        let g = CooccurrenceStrategy
            .build(&["a b", "c"], &nouns, &cfg)
            .unwrap();

        // "b" (end of sentence 1) links to "c" (start of sentence 2)
        assert_eq!(g.weight(&"b".to_string(), &"c".to_string()), Some(1.0));
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_cooccurrence_uses_window() {
        let cfg = TextRankConfig::default().with_window_size(1);
        assert!(CooccurrenceStrategy.build(&["a b"], &nouns, &cfg).is_err());
    }

    #[test]
    fn test_similarity_strategy_ignores_window() {
        let cfg = TextRankConfig::default().with_window_size(1);
        let g = SimilarityStrategy
            .build(&["a b", "b c"], &nouns, &cfg)
            .unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_tasks() {
        assert_eq!(CooccurrenceStrategy.task(), Task::Keywords);
        assert_eq!(SimilarityStrategy.task(), Task::Summary);
    }
}
