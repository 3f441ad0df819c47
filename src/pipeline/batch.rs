//! Parallel ranking over independent documents
//!
//! Each document runs through its own pipeline on the rayon thread pool.
//! Results come back in input order, one per document, so a bad document
//! does not hide the others.

use rayon::prelude::*;

use crate::errors::Result;
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::runner::Pipeline;
use crate::types::{KeySentence, Keyword, TextRankConfig};

/// Extract keywords from every document in parallel
pub fn extract_keywords_batch<D, S, T>(
    documents: &[D],
    tokenizer: &T,
    cfg: &TextRankConfig,
) -> Vec<Result<Vec<Keyword>>>
where
    D: AsRef<[S]> + Sync,
    S: AsRef<str>,
    T: Tokenizer + Sync + ?Sized,
{
    let pipeline = Pipeline::keywords(cfg.clone());
    documents
        .par_iter()
        .map(|doc| pipeline.extract(doc.as_ref(), tokenizer))
        .collect()
}

/// Summarize every document in parallel
pub fn summarize_batch<D, S, T>(
    documents: &[D],
    tokenizer: &T,
    cfg: &TextRankConfig,
) -> Vec<Result<Vec<KeySentence>>>
where
    D: AsRef<[S]> + Sync,
    S: AsRef<str>,
    T: Tokenizer + Sync + ?Sized,
{
    let pipeline = Pipeline::summary(cfg.clone());
    documents
        .par_iter()
        .map(|doc| pipeline.summarize(doc.as_ref(), tokenizer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tokenizer::SimpleTokenizer;

    fn corpus() -> Vec<Vec<String>> {
        vec![
            vec![
                "Rust compilers check ownership".to_string(),
                "ownership rules keep memory safe".to_string(),
            ],
            vec![],
            vec![
                "graphs rank words".to_string(),
                "words link inside windows".to_string(),
                "windows slide across graphs".to_string(),
            ],
        ]
    }

    #[test]
    fn test_keywords_batch_matches_sequential() {
        let tokenizer = SimpleTokenizer::new("en");
        let cfg = TextRankConfig::default().with_top_n(4);
        let docs = corpus();

        let batch = extract_keywords_batch(&docs, &tokenizer, &cfg);
        assert_eq!(batch.len(), docs.len());

        let pipeline = Pipeline::keywords(cfg);
        for (doc, result) in docs.iter().zip(batch) {
            let expected = pipeline.extract(doc, &tokenizer).unwrap();
            assert_eq!(result.unwrap(), expected);
        }
    }

    #[test]
    fn test_summary_batch_keeps_order() {
        let tokenizer = SimpleTokenizer::new("en");
        let docs = corpus();
        let batch = summarize_batch(&docs, &tokenizer, &TextRankConfig::summary());

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].as_ref().unwrap().len(), 2);
        assert!(batch[1].as_ref().unwrap().is_empty());
        assert_eq!(batch[2].as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_batch_reports_invalid_config_per_document() {
        let tokenizer = SimpleTokenizer::new("en");
        let cfg = TextRankConfig::default().with_window_size(1);
        let batch = extract_keywords_batch(&corpus(), &tokenizer, &cfg);
        assert!(batch.iter().all(|r| r.is_err()));
    }
}
