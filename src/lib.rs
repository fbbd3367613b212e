//! depmerge: fold nested `node_modules` trees into one root package
//!
//! When a package inside a mono-repo is packaged on its own, the file list
//! handed to the packager contains paths that climb out of the package
//! (`extension/../other-pkg/node_modules/...`). This crate rewrites such a
//! list so every dependency subtree sits under the root package's own
//! `node_modules` and sibling files that are not dependencies are dropped.
//!
//! ```
//! use depmerge::{normalize, FileRecord, Layout};
//!
//! let records = vec![
//!     FileRecord::new("extension/package.json"),
//!     FileRecord::new("extension/../other-pkg/node_modules/foo/x.js"),
//!     FileRecord::new("extension/../other-pkg/package.json"),
//! ];
//! let merged = normalize(records, &Layout::default());
//! let paths: Vec<_> = merged.iter().map(|r| r.path.as_str()).collect();
//! assert_eq!(paths, ["extension/package.json", "extension/node_modules/foo/x.js"]);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod records;
pub mod render;
pub mod utils;

pub use domain::{Config, Decision, FileRecord, Layout, MergeStats, Outcome, PathRecord, Rule};
pub use error::{ConfigError, RecordError};
pub use merge::{normalize, normalize_par, normalize_with_stats, rewrite_path, Merger, PathRewriter};
