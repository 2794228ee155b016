// Normalised word frequencies over a whole document.
use serde::Serialize;
use std::collections::HashMap;

use super::tokenizer::{scorable_words, Tokenizer};

/// Words shorter than this many characters carry no weight.
const MIN_WORD_CHARS: usize = 3;

/// Word -> weight in [0, 1], where the most frequent word has weight 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordFrequencyMap {
    weights: HashMap<String, f64>,
}

impl WordFrequencyMap {
    pub fn from_text<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in scorable_words(tokenizer, text) {
            if word.chars().count() >= MIN_WORD_CHARS {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let max_count = counts.values().max().copied().unwrap_or(1) as f64;
        let weights = counts
            .into_iter()
            .map(|(word, count)| (word, count as f64 / max_count))
            .collect();

        Self { weights }
    }

    /// Weight of `word`; words never seen weigh 0.
    pub fn weight(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(w, &f)| (w.as_str(), f))
    }
}
