//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use statext_core::models::config::StatextConfig;

/// Load configuration from an explicit path, or fall back to defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<StatextConfig> {
    match config_path {
        Some(path) => Ok(StatextConfig::from_file(Path::new(path))?),
        None => Ok(StatextConfig::default()),
    }
}
