//! Shareable JSON export of an analysis.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use glimpse_core::{AnalysisResult, AnnotationKind};
use serde::Serialize;
use tokio::fs;
use tracing::info;

/// Export form: timestamp, summary, and each result's type/content/confidence.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub results: Vec<ExportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportEntry {
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub content: String,
    pub confidence: f32,
}

impl ExportDocument {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            timestamp: result.timestamp(),
            summary: result.summary().to_string(),
            results: result
                .annotations()
                .iter()
                .map(|a| ExportEntry {
                    kind: a.kind,
                    content: a.content.clone(),
                    confidence: a.confidence,
                })
                .collect(),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis export")
    }
}

/// `vision-analysis-<millis>.json`, keyed on the result's timestamp.
pub fn export_file_name(result: &AnalysisResult) -> String {
    format!("vision-analysis-{}.json", result.timestamp().timestamp_millis())
}

/// Write the export document into `dir`, returning the file path.
pub async fn write_export(result: &AnalysisResult, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(export_file_name(result));
    let json = ExportDocument::from_result(result).to_pretty_json()?;
    fs::write(&path, json)
        .await
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    info!(path = %path.display(), "Wrote analysis export");
    Ok(path)
}
