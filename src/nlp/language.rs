// Offline language identification.
//
// Non-Latin scripts are recognised from their Unicode blocks. Latin-script text is
// matched against per-language stopword lists from the `stop-words` crate: the
// language whose stopwords cover the largest share of the words wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::tokenizer::{scorable_words, RegexTokenizer};
use crate::config::language_name;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub language_code: String,
    pub language_name: String,
    /// Share of the evidence that supports the answer, in [0, 1].
    pub confidence: f64,
}

impl Detection {
    pub fn new(code: &str, confidence: f64) -> Self {
        Self {
            language_code: code.to_string(),
            language_name: language_name(code),
            confidence,
        }
    }
}

/// Identifies the language of a text.
pub trait LanguageDetector: Send + Sync {
    fn detect_language(&self, text: &str) -> Result<Detection>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Han,
    Kana,
    Hangul,
    Devanagari,
    Arabic,
    Cyrillic,
    Other,
}

fn script_of(c: char) -> Script {
    match c as u32 {
        0x3040..=0x30FF | 0x31F0..=0x31FF => Script::Kana,
        0x4E00..=0x9FFF | 0x3400..=0x4DBF => Script::Han,
        0xAC00..=0xD7AF | 0x1100..=0x11FF | 0x3130..=0x318F => Script::Hangul,
        0x0900..=0x097F => Script::Devanagari,
        0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
        0x0400..=0x04FF => Script::Cyrillic,
        _ => Script::Other,
    }
}

#[derive(Debug, Default)]
struct ScriptCounts {
    han: usize,
    kana: usize,
    hangul: usize,
    devanagari: usize,
    arabic: usize,
    cyrillic: usize,
    total: usize,
}

impl ScriptCounts {
    fn of(text: &str) -> Self {
        let mut counts = ScriptCounts::default();
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            counts.total += 1;
            match script_of(c) {
                Script::Han => counts.han += 1,
                Script::Kana => counts.kana += 1,
                Script::Hangul => counts.hangul += 1,
                Script::Devanagari => counts.devanagari += 1,
                Script::Arabic => counts.arabic += 1,
                Script::Cyrillic => counts.cyrillic += 1,
                Script::Other => {}
            }
        }
        counts
    }

    /// Language implied by a dominant non-Latin script, with its share of letters.
    fn dominant_script_language(&self) -> Option<(&'static str, f64)> {
        if self.total == 0 {
            return None;
        }
        let total = self.total as f64;
        let candidates = [
            // Japanese mixes kana with kanji; any kana marks it as Japanese.
            ("ja", if self.kana > 0 { self.kana + self.han } else { 0 }),
            ("zh-cn", if self.kana == 0 { self.han } else { 0 }),
            ("ko", self.hangul),
            ("hi", self.devanagari),
            ("ar", self.arabic),
            ("ru", self.cyrillic),
        ];
        candidates
            .iter()
            .filter(|(_, n)| *n as f64 / total > 0.5)
            .max_by_key(|(_, n)| *n)
            .map(|(code, n)| (*code, *n as f64 / total))
    }
}

/// Stopword-overlap detector; needs no network access.
#[derive(Debug, Clone)]
pub struct StopwordLanguageDetector {
    tokenizer: RegexTokenizer,
    profiles: Vec<(&'static str, HashSet<String>)>,
}

impl Default for StopwordLanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordLanguageDetector {
    pub fn new() -> Self {
        let languages = [
            ("en", LANGUAGE::English),
            ("es", LANGUAGE::Spanish),
            ("fr", LANGUAGE::French),
            ("de", LANGUAGE::German),
            ("it", LANGUAGE::Italian),
            ("pt", LANGUAGE::Portuguese),
            ("nl", LANGUAGE::Dutch),
        ];
        let profiles = languages
            .into_iter()
            .map(|(code, lang)| {
                let words: HashSet<String> = get(lang).iter().map(|s| s.to_string()).collect();
                (code, words)
            })
            .collect();

        Self {
            tokenizer: RegexTokenizer::new(),
            profiles,
        }
    }

    fn detect_latin(&self, text: &str) -> Result<Detection> {
        let words = scorable_words(&self.tokenizer, text);
        if words.is_empty() {
            return Err(Error::Detection("no words to analyze".to_string()));
        }

        let mut best: Option<(&str, usize)> = None;
        for (code, stopwords) in &self.profiles {
            let hits = words.iter().filter(|w| stopwords.contains(w.as_str())).count();
            debug!("Language profile {} matched {} of {} words", code, hits, words.len());
            match best {
                Some((_, best_hits)) if best_hits >= hits => {}
                _ => best = Some((*code, hits)),
            }
        }

        match best {
            Some((code, hits)) if hits > 0 => {
                Ok(Detection::new(code, hits as f64 / words.len() as f64))
            }
            _ => Err(Error::Detection(
                "text does not match any known language".to_string(),
            )),
        }
    }
}

impl LanguageDetector for StopwordLanguageDetector {
    fn detect_language(&self, text: &str) -> Result<Detection> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let counts = ScriptCounts::of(text);
        if counts.total == 0 {
            return Err(Error::Detection("no alphabetic content".to_string()));
        }
        if let Some((code, share)) = counts.dominant_script_language() {
            return Ok(Detection::new(code, share));
        }

        self.detect_latin(text)
    }
}
