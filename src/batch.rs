//! Analyse every supported article file under a directory.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::input::{is_supported, read_file};
use crate::pipeline::{analyze_article, AnalysisReport, AnalysisRequest};
use crate::services::Services;

/// Outcome for one file: a report, or the error that stopped it.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Supported files under `dir`, recursively, in sorted order.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_supported(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Analyse each file with the settings of `template`. A failing file is recorded and skipped.
pub fn run_batch(
    services: &Services,
    dir: &Path,
    template: &AnalysisRequest,
    show_progress: bool,
) -> Result<Vec<BatchEntry>> {
    if !dir.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let files = collect_files(dir);
    info!("Batch analysis of {} files in {}", files.len(), dir.display());

    let pb = if show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")
            .map(|s| s.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut entries = Vec::with_capacity(files.len());
    for path in &files {
        pb.set_message(
            path.file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        let outcome = read_file(path).and_then(|text| {
            let request = AnalysisRequest {
                text,
                title: path.file_stem().map(|s| s.to_string_lossy().to_string()),
                ..template.clone()
            };
            analyze_article(services, &request)
        });

        let entry = match outcome {
            Ok(report) => BatchEntry {
                path: path.to_string_lossy().to_string(),
                report: Some(report),
                error: None,
            },
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                BatchEntry {
                    path: path.to_string_lossy().to_string(),
                    report: None,
                    error: Some(e.to_string()),
                }
            }
        };
        entries.push(entry);
        pb.inc(1);
    }

    pb.finish_with_message("analysis complete");
    Ok(entries)
}

pub fn write_report(entries: &[BatchEntry], out: &Path) -> Result<()> {
    let fout = File::create(out)?;
    serde_json::to_writer_pretty(fout, entries).map_err(io::Error::from)?;
    info!("Wrote batch report to {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::AnalysisOption;
    use crate::services::fakes::services;
    use std::fs;
    use tempfile::TempDir;

    fn template(s: &Services) -> AnalysisRequest {
        let mut request = AnalysisRequest::new(s, "");
        request.options = vec![AnalysisOption::Statistics, AnalysisOption::Keywords];
        request
    }

    #[test]
    fn test_collect_files_sorted_and_filtered() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir(temp_dir.path().join("nested"))?;
        fs::write(temp_dir.path().join("b.txt"), "B.")?;
        fs::write(temp_dir.path().join("a.md"), "A.")?;
        fs::write(temp_dir.path().join("nested").join("c.html"), "<p>C.</p>")?;
        fs::write(temp_dir.path().join("skip.png"), [0u8])?;

        let names: Vec<String> = collect_files(temp_dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.txt", "c.html"]);
        Ok(())
    }

    #[test]
    fn test_failing_file_does_not_abort_batch() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("empty.txt"), "   ")?;
        fs::write(
            temp_dir.path().join("story.txt"),
            "Rivers flooded the valley. Rescue teams reached the valley by boat.",
        )?;

        let s = services("");
        let entries = run_batch(&s, temp_dir.path(), &template(&s), false)?;
        assert_eq!(entries.len(), 2);

        assert!(entries[0].path.ends_with("empty.txt"));
        assert_eq!(entries[0].error.as_deref(), Some("Empty text provided"));
        assert!(entries[0].report.is_none());

        let report = entries[1].report.as_ref().unwrap();
        assert_eq!(report.title.as_deref(), Some("story"));
        assert_eq!(report.statistics.as_ref().unwrap().sentence_count, 2);
        assert_eq!(report.keywords.as_ref().unwrap()[0], ("valley".to_string(), 2));
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let s = services("");
        let result = run_batch(&s, Path::new("/nonexistent/dir"), &template(&s), false);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_write_report() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let out = temp_dir.path().join("report.json");
        let entries = vec![BatchEntry {
            path: "x.txt".to_string(),
            report: None,
            error: Some("boom".to_string()),
        }];
        write_report(&entries, &out)?;

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?).unwrap();
        assert_eq!(value[0]["path"], "x.txt");
        assert_eq!(value[0]["error"], "boom");
        assert!(value[0].get("report").is_none());
        Ok(())
    }
}
