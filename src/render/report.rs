//! Merge report JSON generation.

use crate::domain::{Config, MergeStats, REPORT_SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use serde_json::{Map, Value};
use std::path::Path;

/// Write a JSON summary of one normalize run to `report_path`.
pub fn write_report(
    report_path: &Path,
    stats: &MergeStats,
    config: &Config,
    include_timestamp: bool,
) -> Result<()> {
    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("stats".to_string(), stats.to_report_value());
    report.insert("config".to_string(), config.to_report_value());

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)?;
    Ok(())
}
