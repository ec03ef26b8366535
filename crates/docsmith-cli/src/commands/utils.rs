//! Shared command helpers.

use std::path::{Path, PathBuf};

use docsmith_config::{ConfigError, DocsConfig};

use crate::error::Result;

/// Load configuration from an explicit path or by upward discovery, returning
/// the config together with the directory its relative paths resolve against.
pub fn load_config(explicit: Option<&Path>) -> Result<(DocsConfig, PathBuf)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|error| crate::error::CliError::io(".", error))?;
            DocsConfig::discover(&cwd)
                .ok_or_else(|| ConfigError::NotFound(cwd.join(docsmith_config::CONFIG_FILE_NAME)))?
        }
    };
    let config = DocsConfig::load(&path)?;
    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((config, base))
}

/// Resolve a configured path against the config file's directory.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
