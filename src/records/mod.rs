//! Record list decoding
//!
//! Accepts either a JSON array of objects or JSON Lines (one object per
//! line). Each object must carry a string `path`; all other fields are kept
//! as opaque values.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::domain::FileRecord;
use crate::error::RecordError;

/// On-disk shape of a record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordFormat {
    /// A single JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl RecordFormat {
    /// Guess the format from the first non-whitespace byte.
    pub fn detect(text: &str) -> Self {
        match text.trim_start().as_bytes().first() {
            Some(b'[') => RecordFormat::Json,
            _ => RecordFormat::Jsonl,
        }
    }
}

/// Decode `text`, detecting its format.
pub fn parse_records(text: &str) -> Result<(Vec<FileRecord>, RecordFormat), RecordError> {
    let format = RecordFormat::detect(text);
    let records = match format {
        RecordFormat::Json => parse_json_array(text)?,
        RecordFormat::Jsonl => parse_json_lines(text)?,
    };
    Ok((records, format))
}

fn parse_json_array(text: &str) -> Result<Vec<FileRecord>, RecordError> {
    let values: Vec<Value> = serde_json::from_str(text)
        .map_err(|source| RecordError::InvalidJson { line: source.line(), source })?;
    values.into_iter().enumerate().map(|(index, value)| into_record(index, value)).collect()
}

fn parse_json_lines(text: &str) -> Result<Vec<FileRecord>, RecordError> {
    let mut records = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|source| RecordError::InvalidJson { line: line_idx + 1, source })?;
        records.push(into_record(records.len(), value)?);
    }
    Ok(records)
}

fn into_record(index: usize, value: Value) -> Result<FileRecord, RecordError> {
    let Value::Object(mut fields) = value else {
        return Err(RecordError::NotAnObject { index });
    };
    let path = match fields.shift_remove("path") {
        Some(Value::String(path)) => path,
        Some(_) => return Err(RecordError::PathNotString { index }),
        None => return Err(RecordError::MissingPath { index }),
    };
    Ok(FileRecord { path, extra: fields })
}

/// Read a record list from `input`, or from stdin when it is `None` or `-`.
pub fn load_records(input: Option<&Path>) -> Result<(Vec<FileRecord>, RecordFormat)> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed reading records from {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed reading records from stdin")?;
            buf
        }
    };

    let parsed = parse_records(&text).with_context(|| match input {
        Some(path) => format!("Invalid record list: {}", path.display()),
        None => "Invalid record list on stdin".to_string(),
    })?;
    tracing::debug!(count = parsed.0.len(), format = ?parsed.1, "loaded records");
    Ok(parsed)
}
