//! JSON run summary output.

use crate::analysis::Collection;
use crate::models::RunSummary;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

/// Build the summary of a run from its collected curves.
pub fn build_summary(collection: &Collection, title: &str, chart_path: &Path) -> RunSummary {
    RunSummary {
        generated_at: Utc::now(),
        title: title.to_string(),
        chart_path: chart_path.to_string_lossy().to_string(),
        curves: collection.curves.clone(),
        skipped: collection.skipped.clone(),
    }
}

/// Serialize a summary as pretty-printed JSON.
pub fn generate_json_summary(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize run summary")
}

/// Write the JSON summary to `path`.
pub fn write_json_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = generate_json_summary(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary to {}", path.display()))
}
