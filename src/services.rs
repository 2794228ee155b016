//! Service objects shared by every command, built once at start-up.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{ArticleFetcher, ArticleSource};
use crate::nlp::analyzer::ContentAnalyzer;
use crate::nlp::language::LanguageDetector;
use crate::nlp::sentiment::LexiconSentimentModel;
use crate::nlp::stopwords::Stopwords;
use crate::nlp::summarization::TextSummarizer;
use crate::translate::{HttpTranslator, Translator};

/// Everything an analysis needs. Cheap to clone; all members are shared read-only.
#[derive(Clone)]
pub struct Services {
    pub config: Config,
    pub fetcher: Arc<dyn ArticleSource>,
    pub translator: Arc<dyn Translator>,
    pub detector: Arc<dyn LanguageDetector>,
    pub analyzer: ContentAnalyzer,
    pub summarizer: TextSummarizer,
}

impl Services {
    /// Production wiring: HTTP fetcher, LibreTranslate client for translation and
    /// detection, lexicon sentiment model and the English stopword list.
    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = Arc::new(ArticleFetcher::new(&config)?);
        let translator = Arc::new(HttpTranslator::new(&config)?);

        Ok(Self::new(
            config,
            fetcher,
            translator.clone(),
            translator,
        ))
    }

    /// Wire arbitrary collaborators around the default analyzer and summarizer.
    pub fn new(
        config: Config,
        fetcher: Arc<dyn ArticleSource>,
        translator: Arc<dyn Translator>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        let analyzer = ContentAnalyzer::new(
            Arc::new(LexiconSentimentModel::new()),
            Stopwords::english(),
        );

        Self {
            config,
            fetcher,
            translator,
            detector,
            analyzer,
            summarizer: TextSummarizer::new(),
        }
    }

    /// Replace the language detector, e.g. with the offline stopword detector.
    pub fn with_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;

    #[test]
    fn test_from_config_builds_without_network() {
        let services = Services::from_config(Config::default()).unwrap();
        assert_eq!(services.config.summary_sentences, 3);
    }

    #[test]
    fn test_fake_wiring_is_usable() {
        let services = services("Solar power is growing fast. Investors are happy.");
        let article = services.fetcher.fetch("https://example.com/a").unwrap();
        assert_eq!(article.title, "Fake headline");

        let detection = services.detector.detect_language(&article.text).unwrap();
        assert_eq!(detection.language_code, "en");
    }

    #[test]
    fn test_with_detector_replaces_detector() {
        let services = services("text").with_detector(Arc::new(DownTranslator));
        assert!(services.detector.detect_language("Hello there").is_err());
    }
}
