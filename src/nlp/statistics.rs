// Basic size and readability statistics for a text.
use serde::{Deserialize, Serialize};

use super::tokenizer::{is_alphanumeric_word, Tokenizer};
use crate::config::WORDS_PER_MINUTE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub character_count: usize,
    /// Words per sentence, rounded to one decimal.
    pub avg_sentence_length: f64,
    /// Minutes at 200 words per minute, rounded to one decimal.
    pub reading_time_minutes: f64,
}

pub fn text_statistics<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str) -> TextStatistics {
    let sentence_count = tokenizer.split_sentences(text).len();
    let word_count = tokenizer
        .split_words(text)
        .into_iter()
        .filter(|w| is_alphanumeric_word(w))
        .count();

    let avg_sentence_length = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };

    TextStatistics {
        word_count,
        sentence_count,
        character_count: text.chars().count(),
        avg_sentence_length: round1(avg_sentence_length),
        reading_time_minutes: round1(word_count as f64 / WORDS_PER_MINUTE),
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
