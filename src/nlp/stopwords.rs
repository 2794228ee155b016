// English stopword set.
// Built once and shared read-only; services hold an `Arc` to it instead of
// reaching for a global.
use std::collections::HashSet;
use std::sync::Arc;
use stop_words::{get, LANGUAGE};

/// A read-only set of lower-case stopwords.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: Arc<HashSet<String>>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

impl Stopwords {
    /// The NLTK English list shipped with the `stop-words` crate.
    pub fn english() -> Self {
        let words = get(LANGUAGE::English)
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            words: Arc::new(words),
        }
    }

    /// Stopwords from a custom list; entries are lower-cased.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: Arc::new(words.iter().map(|w| w.to_lowercase()).collect()),
        }
    }

    /// An empty set, which filters nothing.
    pub fn empty() -> Self {
        Self {
            words: Arc::new(HashSet::new()),
        }
    }

    /// `word` is expected to be lower-case already.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
