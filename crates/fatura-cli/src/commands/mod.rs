//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod import;
pub mod list;
pub mod summary;

use std::path::Path;

use fatura_core::models::config::FaturaConfig;

/// Load configuration from an explicit path, the default location, or
/// built-in defaults when neither exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FaturaConfig> {
    if let Some(path) = config_path {
        return Ok(FaturaConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(FaturaConfig::from_file(&default_path)?);
    }

    Ok(FaturaConfig::default())
}
