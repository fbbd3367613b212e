//! The path relocation rule
//!
//! A mono-repo packaged from one of its packages (the root folder) yields
//! paths like `extension/../other-pkg/node_modules/foo/x.js` for hoisted or
//! sibling dependencies. The rule folds every such dependency subtree under
//! the root's own dependency directory and discards sibling files that are
//! not dependencies:
//!
//! | Pattern                                        | Result                          |
//! |------------------------------------------------|---------------------------------|
//! | `extension/node_modules/**`                    | kept as is                      |
//! | `extension/[file]`                             | kept as is                      |
//! | `extension/../../node_modules/**`              | `extension/node_modules/**`     |
//! | `extension/../pkg/node_modules/*/node_modules/**` | `extension/node_modules/*/node_modules/**` |
//! | `extension/../../[file]`                       | dropped                         |
//!
//! Matching is plain substring/prefix matching on the raw path string.

use crate::domain::{Decision, Layout, Outcome, Rule};

/// Precomputed matcher for one [`Layout`].
#[derive(Debug, Clone)]
pub struct PathRewriter {
    root: String,
    deps_dir: String,
    /// `<root>/<deps_dir>`
    merged_prefix: String,
    /// `<root>/../`
    sibling_prefix: String,
}

impl PathRewriter {
    pub fn new(layout: &Layout) -> Self {
        Self {
            root: layout.root_folder.clone(),
            deps_dir: layout.deps_dir.clone(),
            merged_prefix: format!("{}/{}", layout.root_folder, layout.deps_dir),
            sibling_prefix: format!("{}/../", layout.root_folder),
        }
    }

    /// Classify `path` and compute its destination.
    ///
    /// Branch order matters: already-merged paths also contain the
    /// dependency directory name, and sibling dependencies and sibling
    /// strays share the `<root>/../` prefix.
    pub fn decide(&self, path: &str) -> Decision {
        if !path.starts_with(&self.root) {
            return Decision { rule: Rule::OutsideRoot, outcome: Outcome::Unchanged };
        }

        if path.contains(&self.merged_prefix) {
            return Decision { rule: Rule::AlreadyMerged, outcome: Outcome::Unchanged };
        }

        if path.starts_with(&self.sibling_prefix) {
            // Search only past the root name, which may itself contain the
            // dependency directory name under an unvalidated layout.
            let rest = &path[self.root.len()..];
            if let Some(idx) = rest.find(&self.deps_dir) {
                return Decision {
                    rule: Rule::SiblingDependency,
                    outcome: Outcome::Relocated(format!("{}/{}", self.root, &rest[idx..])),
                };
            }
            return Decision { rule: Rule::SiblingStray, outcome: Outcome::Dropped };
        }

        Decision { rule: Rule::RootFile, outcome: Outcome::Unchanged }
    }

    /// Destination path for `path`, or `None` when the file must be dropped.
    pub fn rewrite(&self, path: &str) -> Option<String> {
        match self.decide(path).outcome {
            Outcome::Unchanged => Some(path.to_string()),
            Outcome::Relocated(new_path) => Some(new_path),
            Outcome::Dropped => None,
        }
    }
}

impl Default for PathRewriter {
    fn default() -> Self {
        Self::new(&Layout::default())
    }
}

/// Rewrite `path` using the default `extension` / `node_modules` layout.
pub fn rewrite_path(path: &str) -> Option<String> {
    PathRewriter::default().rewrite(path)
}
