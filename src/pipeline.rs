//! Full-article analysis: detection, optional translation, then the selected analyses.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::nlp::language::Detection;
use crate::nlp::sentiment::{SentenceSentiment, Sentiment};
use crate::nlp::statistics::TextStatistics;
use crate::nlp::summarization::Summary;
use crate::services::Services;
use crate::translate::Translation;

/// Language the analyses are natively run in; translating into it is a no-op.
const ANALYSIS_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOption {
    Translation,
    Sentiment,
    Summarization,
    Keywords,
    Statistics,
}

impl AnalysisOption {
    pub const DEFAULTS: [AnalysisOption; 3] = [
        AnalysisOption::Sentiment,
        AnalysisOption::Summarization,
        AnalysisOption::Keywords,
    ];
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub text: String,
    pub title: Option<String>,
    pub target_language: String,
    pub options: Vec<AnalysisOption>,
    pub summary_sentences: usize,
    pub keyword_count: usize,
}

impl AnalysisRequest {
    /// Request with the default options and the counts from `services.config`.
    pub fn new(services: &Services, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            target_language: services.config.default_language.clone(),
            options: AnalysisOption::DEFAULTS.to_vec(),
            summary_sentences: services.config.summary_sentences,
            keyword_count: services.config.keyword_count,
        }
    }

    fn wants(&self, option: AnalysisOption) -> bool {
        self.options.contains(&option)
    }
}

/// Everything produced by one analysis. Absent fields were not requested or failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<Detection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Translation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<(String, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<TextStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_sentiments: Option<Vec<SentenceSentiment>>,
}

/// Run every requested analysis over the article.
///
/// Only empty input is an error. Individual analyses that fail are logged and left
/// out of the report; a failed translation means the original text is analysed.
pub fn analyze_article(services: &Services, request: &AnalysisRequest) -> Result<AnalysisReport> {
    let text = request.text.as_str();
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let start = Instant::now();
    let mut report = AnalysisReport {
        title: request.title.clone(),
        original_text: text.to_string(),
        ..AnalysisReport::default()
    };

    report.detected_language = services
        .detector
        .detect_language(text)
        .map_err(|e| warn!("Language detection failed: {}", e))
        .ok();

    if request.wants(AnalysisOption::Translation)
        && !request.target_language.eq_ignore_ascii_case(ANALYSIS_LANGUAGE)
    {
        match services
            .translator
            .translate(text, &request.target_language, "auto")
        {
            Ok(translation) => report.translation = Some(translation),
            Err(e) => warn!("Translation failed, analysing original text: {}", e),
        }
    }

    let analysis_text = report
        .translation
        .as_ref()
        .map(|t| t.translated_text.clone())
        .unwrap_or_else(|| text.to_string());

    if request.wants(AnalysisOption::Sentiment) {
        report.sentiment = services
            .analyzer
            .analyze_sentiment(&analysis_text)
            .map_err(|e| warn!("Sentiment analysis failed: {}", e))
            .ok();
    }

    if request.wants(AnalysisOption::Summarization) {
        match services
            .summarizer
            .extractive_summarize(&analysis_text, request.summary_sentences)
        {
            Ok(summary) => {
                report.bullet_points = Some(
                    services
                        .summarizer
                        .bullet_point_summary(&analysis_text, request.summary_sentences),
                );
                report.summary = Some(summary);
            }
            Err(e) => warn!("Summarization failed: {}", e),
        }
    }

    if request.wants(AnalysisOption::Keywords) {
        report.keywords = Some(
            services
                .analyzer
                .extract_keywords(&analysis_text, request.keyword_count),
        );
    }

    if request.wants(AnalysisOption::Statistics) {
        report.statistics = Some(services.analyzer.get_text_statistics(&analysis_text));
    }

    if request.wants(AnalysisOption::Sentiment) {
        report.sentence_sentiments = Some(
            services
                .analyzer
                .analyze_sentence_sentiments(&analysis_text),
        );
    }

    debug!("Analysis options: {:?}", request.options);
    info!(
        "Analysis completed - chars={}, duration={:.2}s",
        text.len(),
        start.elapsed().as_secs_f32()
    );

    Ok(report)
}
