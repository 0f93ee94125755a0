use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tvmount_core::catalog::Catalog;
use tvmount_core::config::{load_config_or_default, resolve_config_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog: Catalog,
    pub horizon_days: u32,
    pub config_path: PathBuf,
}

pub fn load_settings() -> Result<Settings> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &Path) -> Result<Settings> {
    let config = load_config_or_default(config_path).map_err(|error| {
        anyhow!(
            "invalid config at {}: {error}\nFix the config or remove it to use the standard catalog.",
            config_path.display()
        )
    })?;

    Ok(Settings {
        catalog: config.catalog(),
        horizon_days: config.horizon_days(),
        config_path: config_path.to_path_buf(),
    })
}
