//! Mission configuration: launch epoch and video feed roster.
//!
//! The two mutable inputs to the whole system. Loading recovers per field:
//! a corrupt or missing launch date falls back to the built-in epoch
//! without touching a valid feed list, and vice versa. Updates are
//! validated up front and rejected whole, leaving the prior configuration
//! in effect.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use shared::config_storage::{ConfigStorage, ConfigStorageError, StoredConfig};
use std::path::PathBuf;
use thiserror::Error;

/// Built-in launch epoch, used when nothing valid is persisted.
pub const DEFAULT_LAUNCH_EPOCH: &str = "2026-02-07T02:41:00Z";

/// Built-in feed roster; index 0 is the primary feed.
pub const DEFAULT_FEED_IDS: [&str; 3] = ["21X5lGlDOfg", "86YLFOog4GM", "DDU-rZs-Ic4"];

/// A rejected configuration update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unparseable launch date: {0:?}")]
    InvalidLaunchDate(String),
    #[error("video feed list must not be empty")]
    EmptyFeedList,
}

/// Validated console configuration.
///
/// Invariant: `feed_ids` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionConfig {
    /// Absolute instant defining T-0.
    pub launch_epoch: DateTime<Utc>,
    /// Ordered video feed identifiers; index 0 is the primary feed.
    pub feed_ids: Vec<String>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            launch_epoch: default_epoch(),
            feed_ids: default_feed_ids(),
        }
    }
}

impl MissionConfig {
    /// The primary feed identifier.
    pub fn primary_feed(&self) -> &str {
        &self.feed_ids[0]
    }

    /// Build a validated config from the raw persisted shape, recovering
    /// each unusable field to its own default.
    pub fn from_stored(stored: &StoredConfig) -> Self {
        let launch_epoch = match &stored.launch_date {
            Some(raw) => match raw.parse::<DateTime<Utc>>() {
                Ok(parsed) => parsed,
                Err(err) => {
                    log::warn!("ignoring persisted launch date {raw:?}: {err}");
                    default_epoch()
                }
            },
            None => default_epoch(),
        };

        let feed_ids = match &stored.video_ids {
            Some(ids) if !ids.is_empty() => ids.clone(),
            Some(_) => {
                log::warn!("persisted video feed list is empty, using defaults");
                default_feed_ids()
            }
            None => default_feed_ids(),
        };

        Self {
            launch_epoch,
            feed_ids,
        }
    }

    /// The raw persisted shape for this config.
    ///
    /// The epoch is formatted at millisecond precision so a save/load cycle
    /// reproduces it exactly.
    pub fn to_stored(&self) -> StoredConfig {
        StoredConfig {
            launch_date: Some(
                self.launch_epoch
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            video_ids: Some(self.feed_ids.clone()),
        }
    }

    /// Load the configuration from storage.
    ///
    /// A missing file yields the defaults; an unreadable file is logged and
    /// yields the defaults; a readable file recovers per field. This can
    /// not fail: a malformed store never propagates past this point.
    pub fn load(storage: &ConfigStorage) -> Self {
        match storage.load() {
            Some(Ok(stored)) => Self::from_stored(&stored),
            Some(Err(err)) => {
                log::warn!("failed to read persisted config, using defaults: {err}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Validate a requested configuration update.
    ///
    /// A rejected update changes nothing; the caller keeps its prior
    /// config.
    pub fn try_update(launch_date: &str, video_ids: Vec<String>) -> Result<Self, ConfigError> {
        let launch_epoch = launch_date
            .parse::<DateTime<Utc>>()
            .map_err(|_| ConfigError::InvalidLaunchDate(launch_date.to_string()))?;

        if video_ids.is_empty() {
            return Err(ConfigError::EmptyFeedList);
        }

        Ok(Self {
            launch_epoch,
            feed_ids: video_ids,
        })
    }

    /// Persist this configuration.
    pub fn save(&self, storage: &ConfigStorage) -> Result<PathBuf, ConfigStorageError> {
        storage.save(&self.to_stored())
    }
}

fn default_epoch() -> DateTime<Utc> {
    DEFAULT_LAUNCH_EPOCH
        .parse()
        .expect("built-in launch epoch is valid RFC 3339")
}

fn default_feed_ids() -> Vec<String> {
    DEFAULT_FEED_IDS.iter().map(|id| id.to_string()).collect()
}
