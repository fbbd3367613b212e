use thiserror::Error;

/// Failure to decode a record list.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid JSON at line {line}: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Entry is a JSON value but not an object
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("record {index} has no \"path\" field")]
    MissingPath { index: usize },

    #[error("record {index} has a non-string \"path\" field")]
    PathNotString { index: usize },

    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Invalid layout or config values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be a single folder name, got '{value}'")]
    NotAFolderName { field: &'static str, value: String },

    #[error("root_folder '{root_folder}' must not contain deps_dir '{deps_dir}'")]
    RootContainsDepsDir { root_folder: String, deps_dir: String },
}
