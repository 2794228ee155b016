//! Error types shared by every analysis service.

use thiserror::Error;

/// Failures surfaced by the analysis services.
///
/// Every variant maps to one of three categories: bad input, a processing
/// failure inside the text pipeline, or an external dependency (network fetch,
/// translation service) that did not answer.
#[derive(Error, Debug)]
pub enum Error {
    /// The text was empty or whitespace only.
    #[error("Empty text provided")]
    EmptyInput,

    /// A caller-supplied argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Tokenisation or scoring failed.
    #[error("Processing error: {0}")]
    Processing(String),

    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Downloading or parsing an article failed.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The translation service failed.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Language detection failed.
    #[error("Detection error: {0}")]
    Detection(String),

    /// Input file has an extension we cannot read.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short, user-facing advice that accompanies the raw error string.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Error::EmptyInput => Some("Please provide some text to analyze."),
            Error::InvalidArgument(_) | Error::Processing(_) => {
                Some("Summarization failed. Please try with different text.")
            }
            Error::InvalidUrl { .. } | Error::Fetch(_) => Some(
                "Failed to fetch article. Please check the URL or try pasting the text directly.",
            ),
            Error::Translation(_) => Some(
                "Translation failed. The text might be too long or the service is unavailable.",
            ),
            Error::Detection(_) => Some("Language detection failed. Please try again later."),
            Error::UnsupportedFormat(_) => Some("Supported formats are txt, md, html and pdf."),
            Error::Config(_) | Error::Io(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

/// Result alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
