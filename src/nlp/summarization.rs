// Text summarization using an extractive approach.
// Sentences are scored by the normalised frequency of their words, the best ones are kept,
// and the survivors are put back in document order.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

use super::frequency::WordFrequencyMap;
use super::tokenizer::{scorable_words, RegexTokenizer, Tokenizer};
use crate::error::{Error, Result};

/// Marker placed in front of every bullet point.
pub const BULLET: &str = "• ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    pub method: String,
    pub original_sentences: usize,
    pub summary_sentences: usize,
}

/// A sentence with its position in the document and its frequency score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence<'a> {
    pub index: usize,
    pub text: &'a str,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TextSummarizer<T: Tokenizer = RegexTokenizer> {
    tokenizer: T,
}

impl TextSummarizer<RegexTokenizer> {
    pub fn new() -> Self {
        Self::with_tokenizer(RegexTokenizer::new())
    }
}

impl<T: Tokenizer> TextSummarizer<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Pick the `sentence_count` highest-scoring sentences of `text`, in their original order.
    ///
    /// Documents with no more sentences than requested come back verbatim.
    pub fn extractive_summarize(&self, text: &str, sentence_count: usize) -> Result<Summary> {
        if sentence_count == 0 {
            return Err(Error::InvalidArgument(
                "sentence count must be at least 1".to_string(),
            ));
        }

        let sentences = self.tokenizer.split_sentences(text);
        if sentences.len() <= sentence_count {
            debug!(
                "Text has {} sentences, returning it unchanged",
                sentences.len()
            );
            return Ok(Summary {
                summary: text.to_string(),
                method: "extractive".to_string(),
                original_sentences: sentences.len(),
                summary_sentences: sentences.len(),
            });
        }

        let frequencies = WordFrequencyMap::from_text(&self.tokenizer, text);
        let mut ranked = self.score_sentences(&sentences, &frequencies);

        // Highest score first; equal scores keep document order.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        ranked.truncate(sentence_count);
        ranked.sort_by_key(|s| s.index);

        let summary = ranked
            .iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ");

        debug!(
            "Summarized {} sentences down to {}",
            sentences.len(),
            ranked.len()
        );

        Ok(Summary {
            summary,
            method: "extractive".to_string(),
            original_sentences: sentences.len(),
            summary_sentences: ranked.len(),
        })
    }

    /// Score each sentence by the mean weight of its alphanumeric words.
    ///
    /// Sentences are keyed by position, so repeated sentences are scored separately.
    pub fn score_sentences<'a>(
        &self,
        sentences: &[&'a str],
        frequencies: &WordFrequencyMap,
    ) -> Vec<ScoredSentence<'a>> {
        sentences
            .iter()
            .enumerate()
            .map(|(index, &text)| {
                let words = scorable_words(&self.tokenizer, text);
                let total: f64 = words.iter().map(|w| frequencies.weight(w)).sum();
                // Normalize by sentence length to avoid bias toward long sentences
                let score = if words.is_empty() {
                    0.0
                } else {
                    total / words.len() as f64
                };
                ScoredSentence { index, text, score }
            })
            .collect()
    }

    /// Summarize, then return each summary sentence as a bullet point.
    ///
    /// A failed summary gives an empty list.
    pub fn bullet_point_summary(&self, text: &str, point_count: usize) -> Vec<String> {
        match self.extractive_summarize(text, point_count) {
            Ok(result) => self
                .tokenizer
                .split_sentences(&result.summary)
                .into_iter()
                .map(|s| format!("{}{}", BULLET, s.trim()))
                .collect(),
            Err(e) => {
                warn!("Bullet summary failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TECH: &str = "AI is transforming technology. Machine learning is powerful. \
                        Ethics remain a concern. The future is bright.";

    const LONG_TEXT: &str = "Natural language processing is a field of artificial intelligence \
        that focuses on the interaction between computers and humans through natural language. \
        The ultimate objective of NLP is to read, decipher, understand, and make sense of the \
        human languages in a manner that is valuable. NLP combines computational linguistics \
        with statistical models and machine learning. Applications include translation, \
        sentiment analysis, and chatbots. Language models keep improving every year.";

    fn positions(doc: &[&str], picked: &[&str]) -> Vec<usize> {
        picked
            .iter()
            .map(|p| doc.iter().position(|d| d == p).expect("sentence from the document"))
            .collect()
    }

    #[test]
    fn test_example_picks_two_sentences_in_order() {
        let s = TextSummarizer::new();
        let result = s.extractive_summarize(TECH, 2).unwrap();
        assert_eq!(
            result.summary,
            "Machine learning is powerful. Ethics remain a concern."
        );
        assert_eq!(result.original_sentences, 4);
        assert_eq!(result.summary_sentences, 2);
        assert_eq!(result.method, "extractive");
    }

    #[test]
    fn test_short_text_is_returned_verbatim() {
        let s = TextSummarizer::new();
        let short = "This is a short text.  It has two sentences.";
        let result = s.extractive_summarize(short, 3).unwrap();
        assert_eq!(result.summary, short);
        assert_eq!(result.original_sentences, 2);
        assert_eq!(result.summary_sentences, 2);

        let exact = s.extractive_summarize(TECH, 4).unwrap();
        assert_eq!(exact.summary, TECH);
    }

    #[test]
    fn test_empty_text_passes_through() {
        let s = TextSummarizer::new();
        let result = s.extractive_summarize("", 3).unwrap();
        assert_eq!(result.summary, "");
        assert_eq!(result.original_sentences, 0);
    }

    #[test]
    fn test_zero_sentence_count_is_rejected() {
        let s = TextSummarizer::new();
        let err = s.extractive_summarize(TECH, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.user_message().unwrap().contains("Summarization failed"));
    }

    #[test]
    fn test_output_is_ordered_subsequence() {
        let s = TextSummarizer::new();
        let doc = s.tokenizer().split_sentences(LONG_TEXT);
        for k in 1..doc.len() {
            let result = s.extractive_summarize(LONG_TEXT, k).unwrap();
            let picked = s.tokenizer().split_sentences(&result.summary);
            assert_eq!(picked.len(), k);
            assert_eq!(result.summary_sentences, k);
            let pos = positions(&doc, &picked);
            assert!(pos.windows(2).all(|w| w[0] < w[1]), "order broken for k={}", k);
        }
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let s = TextSummarizer::new();
        let first = s.extractive_summarize(LONG_TEXT, 2).unwrap();
        let second = s.extractive_summarize(LONG_TEXT, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_sentences_are_kept_apart() {
        let s = TextSummarizer::new();
        let text = "Rust is fast. Rust is fast. Python is slow. Go is simple.";
        let result = s.extractive_summarize(text, 2).unwrap();
        assert_eq!(result.summary, "Rust is fast. Rust is fast.");
        assert_eq!(result.summary_sentences, 2);
    }

    #[test]
    fn test_score_sentences_normalises_by_length() {
        let s = TextSummarizer::new();
        let sentences = vec!["Cats cats cats.", "Cats and dogs and birds.", "!!!"];
        let freqs = WordFrequencyMap::from_text(s.tokenizer(), "Cats cats cats. Dogs.");
        let scored = s.score_sentences(&sentences, &freqs);
        assert_eq!(scored[0].score, 1.0);
        // cats (1.0) + dogs (1/3), over five words
        assert!((scored[1].score - (4.0 / 3.0) / 5.0).abs() < 1e-9);
        assert_eq!(scored[2].score, 0.0);
    }

    #[test]
    fn test_bullets_match_summary() {
        let s = TextSummarizer::new();
        let bullets = s.bullet_point_summary(LONG_TEXT, 3);
        let summary = s.extractive_summarize(LONG_TEXT, 3).unwrap();
        assert_eq!(bullets.len(), summary.summary_sentences);
        for bullet in &bullets {
            let sentence = bullet.strip_prefix(BULLET).expect("bullet marker");
            assert!(summary.summary.contains(sentence));
        }
    }

    #[test]
    fn test_bullets_empty_on_failure() {
        let s = TextSummarizer::new();
        assert!(s.bullet_point_summary(TECH, 0).is_empty());
    }
}
