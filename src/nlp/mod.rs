//! Natural Language Processing components
//!
//! This module provides the tokenizer capability and stopword filtering.

pub mod stopwords;
pub mod tokenizer;
