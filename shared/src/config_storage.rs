//! Persistence for the console configuration blob.
//!
//! The console persists exactly one document: a JSON object holding the
//! launch date and the ordered video feed list. It is stored in
//! ~/.mission_console/ by default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raw persisted configuration shape.
///
/// Both fields are optional. A missing or unusable field falls back to its
/// own built-in default at the validation layer; the rest of the document
/// is kept. Validation and defaults live with the `MissionConfig` domain
/// type, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Launch epoch (T-0) as an ISO-8601 timestamp string.
    #[serde(rename = "launchDate", skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    /// Ordered video feed identifiers; index 0 is the primary feed.
    #[serde(rename = "videoIds", skip_serializing_if = "Option::is_none")]
    pub video_ids: Option<Vec<String>>,
}

/// Failure while reading or writing the persisted configuration.
#[derive(Debug, Error)]
pub enum ConfigStorageError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration storage manager.
///
/// Manages loading and saving of the console configuration file from a
/// centralized directory (defaults to ~/.mission_console/).
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    /// Root directory for all configuration (e.g., ~/.mission_console)
    root_path: PathBuf,
}

impl ConfigStorage {
    /// Create a new config storage with default path (~/.mission_console)
    pub fn new() -> std::io::Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
        let root_path = PathBuf::from(home).join(".mission_console");
        Ok(Self { root_path })
    }

    /// Create a new config storage with custom root path
    pub fn with_path(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Get the root configuration path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path of the single persisted configuration file.
    fn config_path(&self) -> PathBuf {
        self.root_path.join("mission.json")
    }

    /// Load the persisted configuration.
    ///
    /// Returns None if no configuration has been saved yet.
    /// Returns Some(Err) if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Option<Result<StoredConfig, ConfigStorageError>> {
        let path = self.config_path();

        if !path.exists() {
            return None;
        }

        Some(Self::read_file(&path))
    }

    fn read_file(path: &Path) -> Result<StoredConfig, ConfigStorageError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Save the configuration, creating the config directory if needed.
    ///
    /// Returns the path where the configuration was saved.
    pub fn save(&self, config: &StoredConfig) -> Result<PathBuf, ConfigStorageError> {
        std::fs::create_dir_all(&self.root_path)?;

        let path = self.config_path();
        let raw = serde_json::to_string_pretty(config)?;
        std::fs::write(&path, raw)?;
        log::debug!("persisted console config to {}", path.display());
        Ok(path)
    }

    /// Delete the persisted configuration.
    ///
    /// Returns Ok(true) if the file was deleted, Ok(false) if it didn't exist.
    pub fn delete(&self) -> std::io::Result<bool> {
        let path = self.config_path();

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(path)?;
        Ok(true)
    }
}

impl Default for ConfigStorage {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_path(PathBuf::from(".mission_console")))
    }
}
