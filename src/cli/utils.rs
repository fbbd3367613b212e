//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::Config;

/// Layout options shared by every subcommand that applies the merge rule.
#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Path to config file (depmerge.toml or .depmerge.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Folder name of the package that becomes the merged root
    #[arg(long, value_name = "NAME", env = "DEPMERGE_ROOT_FOLDER")]
    pub root_folder: Option<String>,

    /// Name of the dependency-install directory
    #[arg(long, value_name = "NAME", env = "DEPMERGE_DEPS_DIR")]
    pub deps_dir: Option<String>,

    /// Treat backslashes in record paths as separators
    #[arg(long)]
    pub normalize_separators: bool,
}

impl LayoutArgs {
    /// Resolve the effective config: CLI > env > config file > defaults.
    pub fn resolve(&self, parallel: bool) -> Result<Config> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let file_config = load_config(&cwd, self.config.as_deref())?;
        let overrides = CliOverrides {
            root_folder: self.root_folder.clone(),
            deps_dir: self.deps_dir.clone(),
            normalize_separators: self.normalize_separators,
            parallel,
        };
        let config = merge_cli_with_config(file_config, overrides).context("Invalid layout")?;
        tracing::debug!(?config, "resolved config");
        Ok(config)
    }
}
