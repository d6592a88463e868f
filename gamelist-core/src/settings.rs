//! Shared settings file (database location, owner, batch sizes).
//!
//! The file lives at `~/.config/gamelist-sync/settings.toml`. Every key is
//! optional; a missing file means all defaults. Command-line flags take
//! priority over anything read here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::mapper::DEFAULT_SUPPRESSED_SYSTEMS;

pub const DEFAULT_IMPORT_BATCH_SIZE: usize = 500;
pub const DEFAULT_MERGE_BATCH_SIZE: usize = 50;

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed_systems: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_batch_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_batch_size: Option<usize>,
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gamelist-sync").join("settings.toml")
}

/// Default database location: `<data_dir>/gamelist-sync/catalog.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("gamelist-sync").join("catalog.db")
}

impl Settings {
    /// Load from [`settings_path`].
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load from `path`. A file that does not exist yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write atomically to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Database path: CLI override, then settings, then the default.
    pub fn database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.database.clone())
            .unwrap_or_else(default_database_path)
    }

    /// Owner: CLI override, then settings. `None` means unowned records.
    pub fn owner(&self, cli_override: Option<String>) -> Option<String> {
        cli_override
            .or_else(|| self.owner.clone())
            .filter(|o| !o.is_empty())
    }

    pub fn suppressed_systems(&self) -> Vec<String> {
        match &self.suppressed_systems {
            Some(list) => list.clone(),
            None => DEFAULT_SUPPRESSED_SYSTEMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn import_batch_size(&self) -> usize {
        self.import_batch_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_IMPORT_BATCH_SIZE)
    }

    pub fn merge_batch_size(&self) -> usize {
        self.merge_batch_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MERGE_BATCH_SIZE)
    }
}
