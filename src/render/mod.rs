//! Output rendering for record lists and merge reports

pub mod jsonl;
pub mod report;

pub use jsonl::{render_json, render_jsonl, render_records};
pub use report::write_report;
