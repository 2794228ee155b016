//! Article and news text analysis: extractive summaries, sentiment, keywords,
//! statistics, language detection and translation.

pub mod batch;
pub mod config;
pub mod error;
pub mod fetch;
pub mod input;
pub mod nlp;
pub mod pipeline;
pub mod render;
pub mod response;
pub mod services;
pub mod translate;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{analyze_article, AnalysisOption, AnalysisReport, AnalysisRequest};
pub use services::Services;
