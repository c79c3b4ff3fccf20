//! Subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;

use std::path::Path;

use tracing::debug;

use vitae_core::VitaeConfig;

/// Load the configuration named on the command line, else the user's
/// config file if one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VitaeConfig> {
    if let Some(path) = config_path {
        return Ok(VitaeConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(VitaeConfig::from_file(&default_path)?);
    }

    Ok(VitaeConfig::default())
}
