// Frequency-ranked keyword extraction.

use std::collections::HashMap;

use super::stopwords::Stopwords;
use super::tokenizer::{scorable_words, RegexTokenizer, Tokenizer};

/// Keywords must have at least this many characters unless configured otherwise.
pub const DEFAULT_MIN_KEYWORD_CHARS: usize = 4;

/// Counts non-stopword terms and returns the most frequent ones.
#[derive(Debug, Clone)]
pub struct KeywordExtractor<T: Tokenizer = RegexTokenizer> {
    tokenizer: T,
    stopwords: Stopwords,
    min_chars: usize,
}

impl Default for KeywordExtractor<RegexTokenizer> {
    fn default() -> Self {
        Self::new(Stopwords::english())
    }
}

impl KeywordExtractor<RegexTokenizer> {
    pub fn new(stopwords: Stopwords) -> Self {
        Self::with_tokenizer(RegexTokenizer::new(), stopwords)
    }
}

impl<T: Tokenizer> KeywordExtractor<T> {
    pub fn with_tokenizer(tokenizer: T, stopwords: Stopwords) -> Self {
        Self {
            tokenizer,
            stopwords,
            min_chars: DEFAULT_MIN_KEYWORD_CHARS,
        }
    }

    /// Change the minimum keyword length in characters.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Top `top_n` keywords as `(word, frequency)`, most frequent first.
    ///
    /// Equal frequencies are ordered by first appearance in the text.
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<(String, usize)> {
        // word -> (count, first position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (pos, word) in scorable_words(&self.tokenizer, text).into_iter().enumerate() {
            if word.chars().count() < self.min_chars || self.stopwords.contains(&word) {
                continue;
            }
            counts.entry(word).or_insert((0, pos)).0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(word, (count, _))| (word, count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATS: &str = "the cat sat on the mat, the cat was happy";

    #[test]
    fn test_stopwords_and_short_words_are_dropped() {
        let k = KeywordExtractor::default();
        let keywords = k.extract_keywords(CATS, 2);
        assert_eq!(keywords, vec![("happy".to_string(), 1)]);
    }

    #[test]
    fn test_frequency_ranking_with_shorter_minimum() {
        let k = KeywordExtractor::default().with_min_chars(3);
        let keywords = k.extract_keywords(CATS, 2);
        assert_eq!(keywords[0], ("cat".to_string(), 2));
        assert_eq!(keywords[1], ("sat".to_string(), 1));
        assert!(keywords.iter().all(|(w, _)| w != "the"));
    }

    #[test]
    fn test_ties_follow_first_appearance() {
        let k = KeywordExtractor::default();
        let keywords =
            k.extract_keywords("zebra apple mango apple zebra kiwis mango", 10);
        let words: Vec<&str> = keywords.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["zebra", "apple", "mango", "kiwis"]);
    }

    #[test]
    fn test_document_keyword_extraction() {
        let k = KeywordExtractor::default();
        let text = "Kubernetes kubernetes docker nginx nginx NGINX, and the cluster.";
        let keywords = k.extract_keywords(text, 3);
        assert_eq!(keywords[0], ("nginx".to_string(), 3));
        assert_eq!(keywords[1], ("kubernetes".to_string(), 2));
        assert_eq!(keywords[2], ("docker".to_string(), 1));
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        let k = KeywordExtractor::default();
        assert!(k.extract_keywords("", 5).is_empty());
        assert!(k.extract_keywords("some text here", 0).is_empty());
    }
}
