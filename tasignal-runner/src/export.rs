//! Report export: pretty JSON files, one per symbol and analysis date.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tasignal_core::engine::FullAnalysisReport;

/// Serialize a report to pretty JSON.
pub fn export_json(report: &FullAnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize analysis report to JSON")
}

pub fn import_json(json: &str) -> Result<FullAnalysisReport> {
    serde_json::from_str(json).context("failed to deserialize analysis report from JSON")
}

/// File name for a report: `{SYMBOL}_{YYYY-MM-DD}.json` on the analysis date.
pub fn report_file_name(report: &FullAnalysisReport) -> String {
    format!(
        "{}_{}.json",
        report.symbol,
        report.analysis_date.format("%Y-%m-%d")
    )
}

/// Write `report` into `dir`, creating it if needed. Returns the file path.
pub fn save_report(report: &FullAnalysisReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(report_file_name(report));
    let json = export_json(report)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(symbol = %report.symbol, path = %path.display(), "report saved");
    Ok(path)
}
