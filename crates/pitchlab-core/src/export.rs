// JSON export of a pitcher's summary table.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::filter::PitchFilter;
use crate::pitch::PitchRecord;
use crate::summary::{summarize, uncategorized_count, PitchSummary};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything needed to reproduce a summary table outside the tool.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub pitcher: String,
    pub files: Vec<String>,
    pub dates: Vec<String>,
    pub total_pitches: usize,
    /// Pitches whose type has no summary row.
    pub uncategorized: usize,
    pub generated_at: DateTime<Local>,
    pub rows: Vec<PitchSummary>,
}

impl SummaryReport {
    /// Summarize `rows` (already filtered by `filter`) into a report.
    pub fn build(pitcher: &str, filter: &PitchFilter, rows: &[&PitchRecord]) -> Self {
        SummaryReport {
            pitcher: pitcher.to_string(),
            files: filter.files.iter().cloned().collect(),
            dates: filter.dates.iter().cloned().collect(),
            total_pitches: rows.len(),
            uncategorized: uncategorized_count(rows),
            generated_at: Local::now(),
            rows: summarize(rows),
        }
    }

    /// `<pitcher>_<YYYYmmdd_HHMMSS>.json`, with the pitcher id reduced to
    /// filename-safe characters.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .pitcher
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let safe = if safe.is_empty() { "pitcher".to_string() } else { safe };
        format!("{}_{}.json", safe, self.generated_at.format("%Y%m%d_%H%M%S"))
    }
}

/// Write `report` as pretty-printed JSON under `dir`, creating it if needed.
/// Returns the written path.
pub fn write_report(dir: &Path, report: &SummaryReport) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::CreateDir {
        path: dir.display().to_string(),
        source: e,
    })?;

    let path = dir.join(report.file_name());
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json).map_err(|e| ExportError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    info!(
        "exported {} summary rows for {} to {}",
        report.rows.len(),
        report.pitcher,
        path.display()
    );
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
