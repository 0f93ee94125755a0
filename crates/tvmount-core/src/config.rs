use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::DEFAULT_HORIZON_DAYS;
use crate::catalog::{Catalog, TvSizeClass, WallMountType, WallSurfaceType};
use crate::compatibility::is_compatible;
use crate::session::{DEFAULT_MOUNT, DEFAULT_SIZE_INCHES, DEFAULT_SURFACE};

pub const CONFIG_VERSION: u32 = 1;
pub const MAX_HORIZON_DAYS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TvmountConfig {
    pub version: u32,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

/// Replaces the standard reference tables as a whole when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub sizes: Vec<TvSizeClass>,
    pub mounts: Vec<WallMountType>,
    pub surfaces: Vec<WallSurfaceType>,
}

impl TvmountConfig {
    pub fn catalog(&self) -> Catalog {
        match &self.catalog {
            Some(tables) => Catalog::from_tables(
                tables.sizes.clone(),
                tables.mounts.clone(),
                tables.surfaces.clone(),
            ),
            None => Catalog::standard(),
        }
    }

    pub fn horizon_days(&self) -> u32 {
        self.schedule.horizon_days
    }
}

impl Default for TvmountConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            schedule: ScheduleConfig::default(),
            catalog: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("tvmount")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<TvmountConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: TvmountConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

/// Missing file means defaults; a present but broken file is an error.
pub fn load_config_or_default(path: &Path) -> Result<TvmountConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(TvmountConfig::default());
    }

    load_config(path)
}

pub fn validate_config(config: &TvmountConfig) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(invalid(format!("version must be {CONFIG_VERSION}")));
    }

    let horizon = config.schedule.horizon_days;
    if horizon == 0 || horizon > MAX_HORIZON_DAYS {
        return Err(invalid(format!(
            "schedule.horizon_days must be between 1 and {MAX_HORIZON_DAYS}"
        )));
    }

    if let Some(tables) = &config.catalog {
        validate_catalog_tables(tables)?;
    }

    Ok(())
}

fn validate_catalog_tables(tables: &CatalogConfig) -> Result<(), ConfigError> {
    if tables.sizes.is_empty() {
        return Err(invalid("catalog.sizes must list at least one TV size"));
    }
    if tables.mounts.is_empty() {
        return Err(invalid("catalog.mounts must list at least one wall mount"));
    }
    if tables.surfaces.is_empty() {
        return Err(invalid("catalog.surfaces must list at least one wall surface"));
    }

    let mut seen_sizes = BTreeSet::new();
    for (index, size) in tables.sizes.iter().enumerate() {
        if size.inches == 0 {
            return Err(invalid(format!("catalog.sizes[{index}] inches must be positive")));
        }
        if !seen_sizes.insert(size.inches) {
            return Err(invalid(format!(
                "catalog.sizes[{index}] duplicates size {}",
                size.label()
            )));
        }
    }

    let mut seen_mounts = BTreeSet::new();
    for (index, mount) in tables.mounts.iter().enumerate() {
        if mount.name.trim().is_empty() {
            return Err(invalid(format!("catalog.mounts[{index}] name must be non-empty")));
        }
        if !seen_mounts.insert(mount.kind) {
            return Err(invalid(format!(
                "catalog.mounts[{index}] duplicates mount '{}'",
                mount.kind
            )));
        }
    }

    let mut seen_surfaces = BTreeSet::new();
    for (index, surface) in tables.surfaces.iter().enumerate() {
        if !seen_surfaces.insert(surface.kind) {
            return Err(invalid(format!(
                "catalog.surfaces[{index}] duplicates surface '{}'",
                surface.kind
            )));
        }
    }

    // A fresh booking starts from these selections, so they have to resolve.
    if !seen_sizes.contains(&DEFAULT_SIZE_INCHES) {
        return Err(invalid(format!(
            "catalog.sizes must include the default {DEFAULT_SIZE_INCHES}\" size"
        )));
    }
    let default_mount = tables
        .mounts
        .iter()
        .find(|mount| mount.kind == DEFAULT_MOUNT)
        .ok_or_else(|| {
            invalid(format!(
                "catalog.mounts must include the default '{DEFAULT_MOUNT}' mount"
            ))
        })?;
    if !is_compatible(default_mount, DEFAULT_SIZE_INCHES) {
        return Err(invalid(format!(
            "catalog.mounts '{DEFAULT_MOUNT}' must fit the default {DEFAULT_SIZE_INCHES}\" size"
        )));
    }
    if !seen_surfaces.contains(&DEFAULT_SURFACE) {
        return Err(invalid(format!(
            "catalog.surfaces must include the default '{DEFAULT_SURFACE}' surface"
        )));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}
