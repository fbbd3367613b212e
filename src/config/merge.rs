//! Apply CLI/env overrides on top of file configuration

use crate::domain::Config;
use crate::error::ConfigError;

/// Values supplied on the command line or through `DEPMERGE_*` variables.
///
/// clap resolves flag-vs-env precedence before these reach us.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_folder: Option<String>,
    pub deps_dir: Option<String>,
    pub normalize_separators: bool,
    pub parallel: bool,
}

/// Merge `overrides` into `config` and validate the result.
///
/// Boolean flags can only switch a setting on; a config file that enables
/// one cannot be overridden back off from the CLI.
pub fn merge_cli_with_config(
    mut config: Config,
    overrides: CliOverrides,
) -> Result<Config, ConfigError> {
    if let Some(root_folder) = overrides.root_folder {
        config.root_folder = root_folder;
    }
    if let Some(deps_dir) = overrides.deps_dir {
        config.deps_dir = deps_dir;
    }
    config.normalize_separators |= overrides.normalize_separators;
    config.parallel |= overrides.parallel;

    config.validate()?;
    Ok(config)
}
