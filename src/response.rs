//! The `{"success": ...}` envelope handed to callers instead of raw errors.

use serde::Serialize;

use crate::error::{Error, Result};

/// Serialises as `{"success": true, ...fields of T}` or
/// `{"success": false, "error": "...", "message": "..."}`.
///
/// `T` must serialise as a map; wrap sequences in one of the list types below.
#[derive(Debug, Serialize)]
pub struct Response<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
            message: err.user_message().map(str::to_string),
        }
    }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Response::ok(data),
            Err(e) => Response::failure(&e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KeywordList {
    pub keywords: Vec<(String, usize)>,
}

#[derive(Debug, Serialize)]
pub struct BulletList {
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LanguageList {
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Serialize)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub name: &'static str,
}

impl LanguageList {
    pub fn supported() -> Self {
        Self {
            languages: crate::config::SUPPORTED_LANGUAGES
                .iter()
                .map(|&(code, name)| LanguageEntry { code, name })
                .collect(),
        }
    }
}
