//! Reading article text from local files.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fetch::extract_text_from_html;

/// File extensions `read_file` understands.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "html", "htm", "pdf"];

pub fn is_supported(path: &Path) -> bool {
    extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Read article text from a file, picking the reader by extension.
pub fn read_file(path: &Path) -> Result<String> {
    match extension(path).as_deref() {
        Some("txt") | Some("md") => Ok(fs::read_to_string(path)?),
        Some("html") | Some("htm") => Ok(extract_text_from_html(&fs::read_to_string(path)?)),
        Some("pdf") => pdf_extract::extract_text(path)
            .map_err(|e| Error::Processing(format!("PDF extraction failed: {}", e))),
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}
