//! Pipeline runner: orchestrates stage execution.
//!
//! A [`Pipeline`] pairs a [`GraphStrategy`] with a [`TextRankConfig`].
//! Calling [`Pipeline::run`] executes the stages in order:
//!
//! 1. Validate the config (fails before any graph work)
//! 2. Build the graph
//! 3. Rank (CSR snapshot + propagation)
//! 4. Select the top-T vertices
//!
//! and notifies a [`PipelineObserver`] at each boundary.
//!
//! # Factory methods
//!
//! Use [`Pipeline::keywords()`] and [`Pipeline::summary()`] to build the two
//! standard pipelines without spelling out the strategy type.

use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::graph::builder::cooccurrence_graph;
use crate::graph::csr::CsrGraph;
use crate::graph::weighted::WeightedGraph;
use crate::nlp::tokenizer::Tokenizer;
use crate::pagerank::propagator::RankPropagator;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_GRAPH,
    STAGE_RANK, STAGE_SELECT, STAGE_VALIDATE,
};
use crate::pipeline::traits::{CooccurrenceStrategy, GraphStrategy, SimilarityStrategy};
use crate::summarizer::selector::{Selection, TopKSelector};
use crate::types::{KeySentence, Keyword, SentenceOrder, TextRankConfig};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline: statically-composed stage container
// ============================================================================

/// A ranking pipeline over one graph construction strategy
#[derive(Debug, Clone)]
pub struct Pipeline<GB> {
    pub graph_builder: GB,
    pub config: TextRankConfig,
}

/// Keyword extraction: co-occurrence graph over content words
pub type KeywordPipeline = Pipeline<CooccurrenceStrategy>;

/// Summarization: similarity graph over sentences
pub type SummaryPipeline = Pipeline<SimilarityStrategy>;

impl KeywordPipeline {
    pub fn keywords(config: TextRankConfig) -> Self {
        Pipeline {
            graph_builder: CooccurrenceStrategy,
            config,
        }
    }

    /// Extract keywords, best first
    pub fn extract<S, T>(&self, sentences: &[S], tokenizer: &T) -> Result<Vec<Keyword>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        self.extract_observed(sentences, tokenizer, &mut NoopObserver)
    }

    pub fn extract_observed<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        observer: &mut impl PipelineObserver,
    ) -> Result<Vec<Keyword>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        // Keywords are always ranked by score
        let selections = self.run_with_order(sentences, tokenizer, SentenceOrder::Ranked, observer)?;
        Ok(into_keywords(selections))
    }

    /// Extract keywords from an already filtered token stream
    pub fn extract_from_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<Keyword>> {
        let selections = self.run_stages(SentenceOrder::Ranked, &mut NoopObserver, |cfg| {
            cooccurrence_graph(tokens, cfg.window_size)
        })?;
        Ok(into_keywords(selections))
    }
}

fn into_keywords(selections: Vec<Selection<String>>) -> Vec<Keyword> {
    selections
        .into_iter()
        .map(|s| Keyword {
            text: s.vertex,
            score: s.score,
        })
        .collect()
}

impl SummaryPipeline {
    pub fn summary(config: TextRankConfig) -> Self {
        Pipeline {
            graph_builder: SimilarityStrategy,
            config,
        }
    }

    /// Select key sentences in the config's [`SentenceOrder`]
    pub fn summarize<S, T>(&self, sentences: &[S], tokenizer: &T) -> Result<Vec<KeySentence>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        self.summarize_observed(sentences, tokenizer, &mut NoopObserver)
    }

    pub fn summarize_observed<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        observer: &mut impl PipelineObserver,
    ) -> Result<Vec<KeySentence>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        let selections = self.run(sentences, tokenizer, observer)?;

        // Vertex order skips repeated sentences; report input positions
        let mut first_seen: FxHashMap<&str, usize> = FxHashMap::default();
        for (pos, sentence) in sentences.iter().enumerate() {
            first_seen.entry(sentence.as_ref()).or_insert(pos);
        }

        Ok(selections
            .into_iter()
            .map(|s| {
                let index = first_seen
                    .get(s.vertex.as_str())
                    .copied()
                    .unwrap_or(s.index);
                KeySentence {
                    text: s.vertex,
                    score: s.score,
                    index,
                }
            })
            .collect())
    }
}

// ============================================================================
// Pipeline::run: execute stages in order
// ============================================================================

impl<GB: GraphStrategy> Pipeline<GB> {
    /// Build a pipeline from any graph strategy
    pub fn new(graph_builder: GB, config: TextRankConfig) -> Self {
        Self {
            graph_builder,
            config,
        }
    }

    /// Execute the pipeline, producing the top-T selection.
    ///
    /// The `observer` receives callbacks at each stage boundary. Pass
    /// [`NoopObserver`] for zero-overhead execution.
    pub fn run<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        observer: &mut impl PipelineObserver,
    ) -> Result<Vec<Selection<String>>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        self.run_with_order(sentences, tokenizer, self.config.sentence_order, observer)
    }

    fn run_with_order<S, T>(
        &self,
        sentences: &[S],
        tokenizer: &T,
        order: SentenceOrder,
        observer: &mut impl PipelineObserver,
    ) -> Result<Vec<Selection<String>>>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        self.run_stages(order, observer, |cfg| {
            self.graph_builder.build(sentences, tokenizer, cfg)
        })
    }

    /// Validate, build with `build_graph`, rank and select
    fn run_stages<F>(
        &self,
        order: SentenceOrder,
        observer: &mut impl PipelineObserver,
        build_graph: F,
    ) -> Result<Vec<Selection<String>>>
    where
        F: FnOnce(&TextRankConfig) -> Result<WeightedGraph<String>>,
    {
        let cfg = &self.config;

        // Each stage owns its span guard so spans are siblings

        // Stage 0: Validate
        {
            trace_stage!(STAGE_VALIDATE);
            observer.on_stage_start(STAGE_VALIDATE);
            let clock = StageClock::start();
            cfg.validate(self.graph_builder.task())?;
            observer.on_stage_end(STAGE_VALIDATE, &StageReport::new(clock.elapsed()));
        }

        // Stage 1: Build graph
        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = build_graph(cfg)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.vertex_count())
                .edges(graph.edge_count())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            graph
        };

        // Stage 2: Rank
        let ranked = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let csr = CsrGraph::from_graph(&graph);
            let ranked = RankPropagator::from_config(cfg).run(&csr)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .epochs(ranked.epochs)
                .converged(ranked.converged)
                .residual(ranked.delta)
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            ranked
        };

        // Stage 3: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let selected = TopKSelector::new(cfg.top_n)
            .with_order(order)
            .select(&ranked);
        observer.on_stage_end(STAGE_SELECT, &StageReport::new(clock.elapsed()));

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::nlp::tokenizer::SimpleTokenizer;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::types::{PosTag, TaggedToken};

    fn nouns(sentence: &str) -> Vec<TaggedToken> {
        sentence
            .split_whitespace()
            .map(|w| TaggedToken::new(w, PosTag::Noun))
            .collect()
    }

    fn docs() -> Vec<&'static str> {
        vec![
            "graph ranking finds important words",
            "important words appear near other important words",
            "ranking uses a graph of words",
        ]
    }

    #[test]
    fn test_keyword_pipeline_ranks() {
        let pipeline = Pipeline::keywords(TextRankConfig::default().with_top_n(3));
        let keywords = pipeline.extract(&docs(), &nouns).unwrap();

        assert_eq!(keywords.len(), 3);
        for pair in keywords.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(keywords.iter().any(|k| k.text == "words"));
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let pipeline = Pipeline::keywords(TextRankConfig::default());
        let mut obs = StageTimingObserver::new();
        pipeline.extract_observed(&docs(), &nouns, &mut obs).unwrap();

        let stages: Vec<_> = obs.reports().iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec![STAGE_VALIDATE, STAGE_GRAPH, STAGE_RANK, STAGE_SELECT]);

        let graph = obs.report(STAGE_GRAPH).unwrap();
        assert!(graph.nodes.unwrap() > 0);
        assert!(graph.edges.unwrap() > 0);

        let rank = obs.report(STAGE_RANK).unwrap();
        let epochs = rank.epochs.unwrap();
        assert!((1..=30).contains(&epochs));
    }

    #[test]
    fn test_invalid_config_stops_before_graph() {
        let pipeline = Pipeline::keywords(TextRankConfig::default().with_window_size(11));
        let mut obs = StageTimingObserver::new();
        let err = pipeline.extract_observed(&docs(), &nouns, &mut obs).unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidParameter);
        assert!(obs.reports().is_empty());
    }

    #[test]
    fn test_summary_pipeline_orders() {
        let sentences = docs();
        let ranked = Pipeline::summary(TextRankConfig::summary().with_top_n(2))
            .summarize(&sentences, &nouns)
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].score >= ranked[1].score);

        let in_doc = Pipeline::summary(
            TextRankConfig::summary()
                .with_top_n(2)
                .with_sentence_order(SentenceOrder::Document),
        )
        .summarize(&sentences, &nouns)
        .unwrap();
        assert!(in_doc[0].index < in_doc[1].index);

        let mut a: Vec<_> = ranked.iter().map(|s| s.index).collect();
        let mut b: Vec<_> = in_doc.iter().map(|s| s.index).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_keywords_ignore_document_order() {
        let cfg = TextRankConfig::default().with_sentence_order(SentenceOrder::Document);
        let keywords = Pipeline::keywords(cfg).extract(&docs(), &nouns).unwrap();
        for pair in keywords.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        let tokenizer = SimpleTokenizer::default();
        assert!(Pipeline::keywords(TextRankConfig::default())
            .extract(&empty, &tokenizer)
            .unwrap()
            .is_empty());
        assert!(Pipeline::summary(TextRankConfig::summary())
            .summarize(&empty, &tokenizer)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_summary_index_is_input_position() {
        let sentences = ["x y", "x y", "y z"];
        let picked = Pipeline::summary(TextRankConfig::summary())
            .summarize(&sentences, &nouns)
            .unwrap();

        assert_eq!(picked.len(), 2);
        let mut indices: Vec<_> = picked.iter().map(|s| s.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 2]);
    }

    /// Counts how deeply spans are nested while the pipeline runs
    #[cfg(feature = "tracing")]
    mod span_depth {
        use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing::span::{Attributes, Id, Record};
        use tracing::{Event, Metadata, Subscriber};

        #[derive(Default)]
        pub struct DepthRecorder {
            next_id: AtomicU64,
            depth: AtomicUsize,
            pub max_depth: AtomicUsize,
            pub entered: AtomicUsize,
        }

        pub struct Recorder(pub Arc<DepthRecorder>);

        impl Subscriber for Recorder {
            fn enabled(&self, _: &Metadata<'_>) -> bool {
                true
            }

            fn new_span(&self, _: &Attributes<'_>) -> Id {
                Id::from_u64(self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1)
            }

            fn record(&self, _: &Id, _: &Record<'_>) {}

            fn record_follows_from(&self, _: &Id, _: &Id) {}

            fn event(&self, _: &Event<'_>) {}

            fn enter(&self, _: &Id) {
                let depth = self.0.depth.fetch_add(1, Ordering::SeqCst) + 1;
                self.0.max_depth.fetch_max(depth, Ordering::SeqCst);
                self.0.entered.fetch_add(1, Ordering::SeqCst);
            }

            fn exit(&self, _: &Id) {
                self.0.depth.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_stage_spans_are_siblings() {
        use span_depth::{DepthRecorder, Recorder};
        use std::sync::atomic::Ordering;
        use std::sync::Arc;

        let state = Arc::new(DepthRecorder::default());
        let pipeline = Pipeline::keywords(TextRankConfig::default());
        tracing::subscriber::with_default(Recorder(Arc::clone(&state)), || {
            pipeline.extract(&docs(), &nouns).unwrap();
        });

        assert_eq!(state.entered.load(Ordering::SeqCst), 4);
        assert_eq!(state.max_depth.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_extract_from_tokens() {
        let pipeline = Pipeline::keywords(TextRankConfig::default());
        let keywords = pipeline.extract_from_tokens(&["a", "b", "a", "c"]).unwrap();

        let texts: Vec<_> = keywords.iter().map(|k| k.text.as_str()).collect();
        assert_eq!(texts.len(), 3);
        // a, b and c form a triangle of unit edges, so every score stays 1.0
        // and ties fall back to first appearance
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(keywords.iter().all(|k| (k.score - 1.0).abs() < 1e-12));

        let bad = Pipeline::keywords(TextRankConfig::default().with_window_size(1));
        assert!(bad.extract_from_tokens(&["a", "b"]).is_err());
    }

    #[test]
    fn test_generic_run() {
        let pipeline = Pipeline::new(SimilarityStrategy, TextRankConfig::summary());
        let picked = pipeline
            .run(&["x y", "y z", "q"], &nouns, &mut NoopObserver)
            .unwrap();
        assert_eq!(picked.len(), 3);
        // The isolated-overlap sentence "q" scores lowest
        assert_eq!(picked[2].vertex, "q");
    }
}
