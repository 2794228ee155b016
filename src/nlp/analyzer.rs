// Content analysis: sentiment, keywords and statistics for article text.

use std::sync::Arc;
use tracing::warn;

use super::keywords::KeywordExtractor;
use super::sentiment::{preview, Sentiment, SentenceSentiment, SentimentModel};
use super::statistics::{text_statistics, TextStatistics};
use super::stopwords::Stopwords;
use super::tokenizer::{RegexTokenizer, Tokenizer};
use crate::config::SENTENCE_PREVIEW_CHARS;
use crate::error::Result;

/// Bundles the sentiment model and keyword extractor behind one interface.
#[derive(Clone)]
pub struct ContentAnalyzer {
    tokenizer: RegexTokenizer,
    model: Arc<dyn SentimentModel>,
    keywords: KeywordExtractor,
}

impl ContentAnalyzer {
    pub fn new(model: Arc<dyn SentimentModel>, stopwords: Stopwords) -> Self {
        Self {
            tokenizer: RegexTokenizer::new(),
            model,
            keywords: KeywordExtractor::new(stopwords),
        }
    }

    /// Replace the keyword extractor, e.g. to change the minimum keyword length.
    pub fn with_keyword_extractor(mut self, keywords: KeywordExtractor) -> Self {
        self.keywords = keywords;
        self
    }

    /// Overall polarity, subjectivity and label of `text`.
    pub fn analyze_sentiment(&self, text: &str) -> Result<Sentiment> {
        self.model.score(text).map(Sentiment::from)
    }

    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<(String, usize)> {
        self.keywords.extract_keywords(text, top_n)
    }

    pub fn get_text_statistics(&self, text: &str) -> TextStatistics {
        text_statistics(&self.tokenizer, text)
    }

    /// Polarity of every sentence, in order.
    ///
    /// Sentence text is shortened for display only; scoring sees the full sentence.
    /// Any scoring failure yields an empty list.
    pub fn analyze_sentence_sentiments(&self, text: &str) -> Vec<SentenceSentiment> {
        let scored: Result<Vec<SentenceSentiment>> = self
            .tokenizer
            .split_sentences(text)
            .into_iter()
            .map(|sentence| {
                self.model.score(sentence).map(|score| SentenceSentiment {
                    sentence: preview(sentence, SENTENCE_PREVIEW_CHARS),
                    polarity: score.polarity,
                })
            })
            .collect();

        scored.unwrap_or_else(|e| {
            warn!("Sentence sentiment failed: {}", e);
            Vec::new()
        })
    }
}
