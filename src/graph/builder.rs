//! Graph construction strategies
//!
//! - **Co-occurrence**: tokens are vertices; two distinct tokens are linked
//!   (weight 1) when they appear within a window of each other.
//! - **Similarity**: sentences are vertices; every pair is linked with its
//!   normalized lexical overlap, including zero-overlap pairs.

use super::weighted::WeightedGraph;
use crate::errors::{Result, TextRankError};
use crate::nlp::tokenizer::{content_words, Tokenizer};
use rustc_hash::FxHashSet;

/// Smallest accepted co-occurrence window
pub const MIN_WINDOW: usize = 2;
/// Largest accepted co-occurrence window
pub const MAX_WINDOW: usize = 10;

/// Check that a window size is within `MIN_WINDOW..=MAX_WINDOW`
pub fn check_window(window_size: usize) -> Result<()> {
    if (MIN_WINDOW..=MAX_WINDOW).contains(&window_size) {
        Ok(())
    } else {
        Err(TextRankError::invalid_parameter(
            "window_size",
            format!("must be in [{MIN_WINDOW}, {MAX_WINDOW}], got {window_size}"),
        ))
    }
}

/// Build a co-occurrence graph from a token stream
///
/// Every token becomes a vertex; repeated tokens reuse the first vertex.
/// Position `i` is paired with every position in `[i - window, i + window)`
/// (clipped to the stream) holding a different token. The window is
/// deliberately asymmetric: it reaches `window` positions back but only
/// `window - 1` forward. Repeated pairings do not raise the weight.
pub fn cooccurrence_graph<S: AsRef<str>>(
    tokens: &[S],
    window_size: usize,
) -> Result<WeightedGraph<String>> {
    check_window(window_size)?;

    let mut graph = WeightedGraph::with_capacity(tokens.len() / 2);
    let ids: Vec<u32> = tokens
        .iter()
        .map(|t| graph.add_vertex(t.as_ref().to_string()))
        .collect();

    for (i, &node_i) in ids.iter().enumerate() {
        let start = i.saturating_sub(window_size);
        let end = std::cmp::min(ids.len(), i + window_size);
        for &node_j in &ids[start..end] {
            if node_i != node_j {
                graph.link(node_i, node_j, 1.0);
            }
        }
    }

    Ok(graph)
}

/// Normalized lexical overlap between two token lists
///
/// `|set(a) ∩ set(b)| / (len(a) + len(b))`, where the lengths count
/// duplicates. Two empty lists score 0.
pub fn overlap_similarity<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    let set_a: FxHashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: FxHashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    let overlap = set_a.iter().filter(|t| set_b.contains(*t)).count();
    overlap as f64 / total as f64
}

/// Build a similarity graph over sentences with pre-computed content tokens
///
/// `token_lists[i]` holds the content words of `sentences[i]`. Identical
/// sentences collapse into one vertex (first occurrence wins), and every
/// pair of distinct vertices gets an edge, even when the overlap is zero.
pub fn similarity_graph_from_tokens<S, T>(
    sentences: &[S],
    token_lists: &[Vec<T>],
) -> WeightedGraph<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut graph = WeightedGraph::with_capacity(sentences.len());
    let mut units: Vec<(u32, &[T])> = Vec::with_capacity(sentences.len());

    for (sentence, tokens) in sentences.iter().zip(token_lists) {
        let before = graph.vertex_count();
        let id = graph.add_vertex(sentence.as_ref().to_string());
        if graph.vertex_count() > before {
            units.push((id, tokens.as_slice()));
        }
    }

    for (i, &(id_i, tokens_i)) in units.iter().enumerate() {
        for &(id_j, tokens_j) in &units[i + 1..] {
            let weight = overlap_similarity(tokens_i, tokens_j);
            graph.link(id_i, id_j, weight);
        }
    }

    graph
}

/// Build a similarity graph, tokenizing each distinct sentence once
pub fn similarity_graph<S, T>(sentences: &[S], tokenizer: &T) -> WeightedGraph<String>
where
    S: AsRef<str>,
    T: Tokenizer + ?Sized,
{
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut distinct: Vec<&str> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        if seen.insert(sentence.as_ref()) {
            distinct.push(sentence.as_ref());
        }
    }

    let token_lists: Vec<Vec<String>> = distinct
        .iter()
        .map(|s| content_words(tokenizer, s))
        .collect();

    similarity_graph_from_tokens(&distinct, &token_lists)
}
