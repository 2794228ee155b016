//! Translation through a LibreTranslate-compatible HTTP service.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::nlp::language::{Detection, LanguageDetector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub original_text: String,
}

/// Translates text between languages. `source_language` may be `"auto"`.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<Translation>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
    detected_language: Option<DetectedLanguage>,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct DetectedLanguage {
    /// Percentage, 0-100.
    confidence: f64,
    language: String,
}

/// Blocking client for the translation service. Failures are reported, never retried.
pub struct HttpTranslator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Translation(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.translate_url.trim_end_matches('/').to_string(),
            api_key: config.translate_api_key.clone(),
        })
    }

    /// POST `body` as JSON to `path`. Failures are wrapped with `on_error` so each
    /// endpoint reports its own error kind.
    fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
        on_error: fn(String) -> Error,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| on_error(format!("request to {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(on_error(format!("{} returned HTTP {}", url, status)));
        }

        resp.json::<R>()
            .map_err(|e| on_error(format!("decoding response from {}: {}", url, e)))
    }
}

impl Translator for HttpTranslator {
    fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<Translation> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let start = Instant::now();
        debug!(
            "Translating {} chars - source={}, target={}",
            text.len(),
            source_language,
            target_language
        );

        let request = TranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let resp: TranslateResponse = self.post("/translate", &request, Error::Translation)?;

        let source = match resp.detected_language {
            Some(d) => d.language,
            None => source_language.to_string(),
        };

        info!(
            "Translation completed - {}->{}, duration={:.2}s",
            source,
            target_language,
            start.elapsed().as_secs_f32()
        );

        Ok(Translation {
            translated_text: resp.translated_text,
            source_language: source,
            target_language: target_language.to_string(),
            original_text: text.to_string(),
        })
    }
}

impl LanguageDetector for HttpTranslator {
    fn detect_language(&self, text: &str) -> Result<Detection> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let request = DetectRequest {
            q: text,
            api_key: self.api_key.as_deref(),
        };
        let candidates: Vec<DetectedLanguage> =
            self.post("/detect", &request, Error::Detection)?;

        candidates
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .map(|best| Detection::new(&best.language, (best.confidence / 100.0).clamp(0.0, 1.0)))
            .ok_or_else(|| Error::Detection("service returned no candidates".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_translator() -> HttpTranslator {
        let config = Config {
            // Nothing listens on the discard port.
            translate_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Config::default()
        };
        HttpTranslator::new(&config).unwrap()
    }

    #[test]
    fn test_empty_text_is_rejected_before_any_request() {
        let t = unreachable_translator();
        assert!(matches!(t.translate("  \n", "es", "auto"), Err(Error::EmptyInput)));
        assert!(matches!(t.detect_language(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_unreachable_service_is_a_translation_failure() {
        let t = unreachable_translator();
        let err = t.translate("Hello world", "es", "auto").unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
        assert!(err.user_message().unwrap().contains("service is unavailable"));

        let err = t.detect_language("Hello world").unwrap_err();
        assert!(matches!(err, Error::Detection(_)));
    }

    #[test]
    fn test_post_failures_use_the_endpoint_error_kind() {
        let t = unreachable_translator();
        let body = DetectRequest { q: "hi", api_key: None };

        match t.post::<_, Vec<DetectedLanguage>>("/detect", &body, Error::Detection) {
            Err(Error::Detection(msg)) => assert!(msg.contains("/detect")),
            Err(other) => panic!("expected a detection error, got {:?}", other),
            Ok(_) => panic!("unreachable host answered"),
        }

        let result = t.post::<_, TranslateResponse>("/translate", &body, Error::Translation);
        assert!(matches!(result, Err(Error::Translation(_))));
    }

    #[test]
    fn test_request_serialization_omits_missing_key() {
        let req = TranslateRequest {
            q: "hi",
            source: "auto",
            target: "fr",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["target"], "fr");
        assert!(json.get("api_key").is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let resp: TranslateResponse = serde_json::from_str(
            r#"{"translatedText":"Bonjour","detectedLanguage":{"confidence":92.0,"language":"en"}}"#,
        )
        .unwrap();
        assert_eq!(resp.translated_text, "Bonjour");
        assert_eq!(resp.detected_language.unwrap().language, "en");

        let resp: TranslateResponse =
            serde_json::from_str(r#"{"translatedText":"Hola"}"#).unwrap();
        assert!(resp.detected_language.is_none());
    }
}
