//! CLI command implementations.

pub mod check;
pub mod list;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use folio_collection::{ProjectCollection, ProjectCollector};
use folio_core::Config;

/// Site root for a configuration file: the directory that contains it.
pub fn site_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load configuration and the project collection it points at.
pub fn load_collection(config_path: &Path) -> Result<(Config, ProjectCollection)> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let collector = ProjectCollector::new(config.clone(), site_root(config_path));
    let collection = collector
        .collect()
        .wrap_err("Failed to read project collection")?;
    Ok((config, collection))
}
