//! Core data types shared across the crate

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Default name of the package folder that survives as the merged root.
pub const DEFAULT_ROOT_FOLDER: &str = "extension";

/// Default name of the dependency-install directory.
pub const DEFAULT_DEPS_DIR: &str = "node_modules";

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A file record produced by the packaging pipeline.
///
/// Only `path` is interpreted. Every other field is carried through
/// untouched so the consumer sees exactly what the producer emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), extra: Map::new() }
    }

    /// Attach an opaque field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Anything that carries a relocatable path.
pub trait PathRecord {
    fn path(&self) -> &str;
    fn set_path(&mut self, path: String);
}

impl PathRecord for FileRecord {
    fn path(&self) -> &str {
        &self.path
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
    }
}

impl PathRecord for String {
    fn path(&self) -> &str {
        self.as_str()
    }

    fn set_path(&mut self, path: String) {
        *self = path;
    }
}

/// Folder names the merge rule operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub root_folder: String,
    pub deps_dir: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            root_folder: DEFAULT_ROOT_FOLDER.to_string(),
            deps_dir: DEFAULT_DEPS_DIR.to_string(),
        }
    }
}

impl Layout {
    pub fn new(root_folder: impl Into<String>, deps_dir: impl Into<String>) -> Self {
        Self { root_folder: root_folder.into(), deps_dir: deps_dir.into() }
    }
}

/// Settings for one run, after file/env/CLI merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root_folder: String,
    pub deps_dir: String,
    pub normalize_separators: bool,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_folder: DEFAULT_ROOT_FOLDER.to_string(),
            deps_dir: DEFAULT_DEPS_DIR.to_string(),
            normalize_separators: false,
            parallel: false,
        }
    }
}

impl Config {
    pub fn layout(&self) -> Layout {
        Layout::new(self.root_folder.clone(), self.deps_dir.clone())
    }

    /// Both names must be a single non-empty path segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("root_folder", &self.root_folder), ("deps_dir", &self.deps_dir)] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
            if value.contains('/') || value.contains('\\') || value == ".." || value == "." {
                return Err(ConfigError::NotAFolderName { field, value: value.clone() });
            }
        }
        if self.root_folder.contains(&self.deps_dir) {
            return Err(ConfigError::RootContainsDepsDir {
                root_folder: self.root_folder.clone(),
                deps_dir: self.deps_dir.clone(),
            });
        }
        Ok(())
    }

    pub fn to_report_value(&self) -> Value {
        serde_json::json!({
            "root_folder": self.root_folder,
            "deps_dir": self.deps_dir,
            "normalize_separators": self.normalize_separators,
            "parallel": self.parallel,
        })
    }
}

/// Which branch of the merge rule decided a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Not under the root folder at all.
    OutsideRoot,
    /// Already below the root's own dependency directory.
    AlreadyMerged,
    /// Dependency file from a sibling or ancestor package.
    SiblingDependency,
    /// Non-dependency file from a sibling or ancestor package.
    SiblingStray,
    /// Any other file directly under the root.
    RootFile,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::OutsideRoot => "outside-root",
            Rule::AlreadyMerged => "already-merged",
            Rule::SiblingDependency => "sibling-dependency",
            Rule::SiblingStray => "sibling-stray",
            Rule::RootFile => "root-file",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// What happens to a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Relocated(String),
    Dropped,
}

/// A rule decision together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub rule: Rule,
    pub outcome: Outcome,
}

impl Decision {
    pub fn is_dropped(&self) -> bool {
        matches!(self.outcome, Outcome::Dropped)
    }
}

/// Counters for one normalize pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub total: usize,
    pub unchanged: usize,
    pub relocated: usize,
    pub dropped: usize,
}

impl MergeStats {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Relocated(_) => self.relocated += 1,
            Outcome::Dropped => self.dropped += 1,
        }
    }

    pub fn kept(&self) -> usize {
        self.unchanged + self.relocated
    }

    pub fn to_report_value(&self) -> Value {
        serde_json::json!({
            "total": self.total,
            "kept": self.kept(),
            "unchanged": self.unchanged,
            "relocated": self.relocated,
            "dropped": self.dropped,
        })
    }
}
