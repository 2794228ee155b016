//! Runtime configuration and fixed analysis constants.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Polarity strictly above this is classified Positive.
pub const SENTIMENT_THRESHOLD_POSITIVE: f64 = 0.1;
/// Polarity strictly below this is classified Negative.
pub const SENTIMENT_THRESHOLD_NEGATIVE: f64 = -0.1;
/// Reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: f64 = 200.0;
/// Sentence text shown in per-sentence sentiment output is cut to this many characters.
pub const SENTENCE_PREVIEW_CHARS: usize = 100;

/// Languages offered for translation, keyed by service language code.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("zh-cn", "Chinese (Simplified)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("ru", "Russian"),
];

/// Display name for a language code, or the upper-cased code when unknown.
pub fn language_name(code: &str) -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES
        .iter()
        .any(|(c, _)| c.eq_ignore_ascii_case(code))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Language the analysis is reported in.
    pub default_language: String,
    /// Sentences kept by the extractive summary.
    pub summary_sentences: usize,
    /// Bullet points produced by the bullet summary.
    pub bullet_points: usize,
    /// Keywords reported by a full analysis.
    pub keyword_count: usize,
    /// HTTP timeout in seconds for fetches and translation calls.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Base URL of a LibreTranslate-compatible service.
    pub translate_url: String,
    pub translate_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            summary_sentences: 3,
            bullet_points: 5,
            keyword_count: 15,
            request_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            translate_url: "http://localhost:5000".to_string(),
            translate_api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment, after trying the usual `.env` files.
    pub fn from_env() -> Result<Self> {
        Self::try_load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(lang) = lookup("DEFAULT_LANGUAGE") {
            config.default_language = lang;
        }
        if let Some(v) = lookup("SUMMARY_SENTENCES") {
            config.summary_sentences = parse_positive("SUMMARY_SENTENCES", &v)?;
        }
        if let Some(v) = lookup("BULLET_POINTS") {
            config.bullet_points = parse_positive("BULLET_POINTS", &v)?;
        }
        if let Some(v) = lookup("KEYWORD_COUNT") {
            config.keyword_count = parse_positive("KEYWORD_COUNT", &v)?;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT") {
            config.request_timeout_secs = parse_positive("REQUEST_TIMEOUT", &v)? as u64;
        }
        if let Some(ua) = lookup("USER_AGENT") {
            config.user_agent = ua;
        }
        if let Some(url) = lookup("TRANSLATE_URL") {
            config.translate_url = url.trim_end_matches('/').to_string();
        }
        config.translate_api_key = lookup("TRANSLATE_API_KEY").filter(|k| !k.trim().is_empty());

        Ok(config)
    }

    fn try_load_dotenv() {
        // 1. Current directory
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. <config_dir>/newslens/.env
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("newslens").join(".env");
            if path.exists() && dotenvy::from_path(&path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".env");
            if path.exists() {
                let _ = dotenvy::from_path(&path);
            }
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.summary_sentences, 3);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.translate_api_key.is_none());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUMMARY_SENTENCES", "5"),
            ("TRANSLATE_URL", "https://translate.example.org/"),
            ("TRANSLATE_API_KEY", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.summary_sentences, 5);
        assert_eq!(config.translate_url, "https://translate.example.org");
        assert_eq!(config.translate_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("BULLET_POINTS", "zero")]));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Config::from_lookup(lookup_from(&[("KEYWORD_COUNT", "0")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_language_name_lookup() {
        assert_eq!(language_name("es"), "Spanish");
        assert_eq!(language_name("zh-CN"), "Chinese (Simplified)");
        assert_eq!(language_name("sw"), "SW");
        assert!(is_supported_language("hi"));
        assert!(!is_supported_language("xx"));
    }
}
