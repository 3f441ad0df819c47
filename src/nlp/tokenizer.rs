//! Tokenizer capability
//!
//! The graph builders never tag text themselves. Callers inject anything
//! implementing [`Tokenizer`] (a POS tagger binding, a closure over
//! pre-computed tags, ...). [`SimpleTokenizer`] is a dependency-free fallback
//! that treats every non-stopword as a noun.

use super::stopwords::StopwordFilter;
use crate::types::{PosTag, TaggedToken};

/// Turns a sentence into an ordered sequence of tagged tokens
pub trait Tokenizer {
    fn tokenize(&self, sentence: &str) -> Vec<TaggedToken>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<TaggedToken>,
{
    fn tokenize(&self, sentence: &str) -> Vec<TaggedToken> {
        self(sentence)
    }
}

/// Tokenize a sentence and keep the surface forms of nouns, verbs and
/// adjectives, in order
pub fn content_words<T: Tokenizer + ?Sized>(tokenizer: &T, sentence: &str) -> Vec<String> {
    tokenizer
        .tokenize(sentence)
        .into_iter()
        .filter(|t| t.pos.is_content())
        .map(|t| t.text)
        .collect()
}

/// Whitespace/punctuation tokenizer with stopword tagging
///
/// Splits on any non-alphanumeric character, lowercases, and tags stopwords
/// as [`PosTag::Other`]; every other word is tagged [`PosTag::Noun`].
#[derive(Debug, Clone)]
pub struct SimpleTokenizer {
    stopwords: StopwordFilter,
    lowercase: bool,
}

impl Default for SimpleTokenizer {
    fn default() -> Self {
        Self::new("en")
    }
}

impl SimpleTokenizer {
    /// Create a tokenizer using the stopword list for `language`
    pub fn new(language: &str) -> Self {
        Self::with_stopwords(StopwordFilter::new(language))
    }

    /// Create a tokenizer with a custom stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self {
            stopwords,
            lowercase: true,
        }
    }

    /// Keep the original casing of surface forms
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, sentence: &str) -> Vec<TaggedToken> {
        sentence
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| {
                let text = if self.lowercase {
                    w.to_lowercase()
                } else {
                    w.to_string()
                };
                let pos = if self.stopwords.is_stopword(&text) {
                    PosTag::Other
                } else {
                    PosTag::Noun
                };
                TaggedToken::new(text, pos)
            })
            .collect()
    }
}
