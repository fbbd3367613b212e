//! JSON and JSON Lines rendering for record lists

use crate::domain::FileRecord;
use crate::error::RecordError;
use crate::records::RecordFormat;

/// One compact object per line, newline-terminated. Empty input renders as "".
pub fn render_jsonl(records: &[FileRecord]) -> Result<String, RecordError> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record).map_err(RecordError::Encode)?);
        out.push('\n');
    }
    Ok(out)
}

/// A pretty-printed JSON array followed by a newline.
pub fn render_json(records: &[FileRecord]) -> Result<String, RecordError> {
    let mut out = serde_json::to_string_pretty(records).map_err(RecordError::Encode)?;
    out.push('\n');
    Ok(out)
}

pub fn render_records(records: &[FileRecord], format: RecordFormat) -> Result<String, RecordError> {
    match format {
        RecordFormat::Json => render_json(records),
        RecordFormat::Jsonl => render_jsonl(records),
    }
}
