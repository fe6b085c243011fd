//! Import and export of a channel set.
//!
//! A snapshot is a flat list of channels. It is the file format the CLI reads
//! (`.json` or `.toml`) and a convenient way to freeze a live table.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CoreError;
use crate::graph::ChannelTable;
use crate::types::Channel;

/// Serializable list of channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl NetworkSnapshot {
    /// Capture every channel currently in `table`.
    pub fn capture(table: &ChannelTable) -> Self {
        Self {
            channels: table.all_channels(),
        }
    }

    /// Build a validated channel table from this snapshot.
    pub fn into_table(self) -> Result<ChannelTable, CoreError> {
        ChannelTable::from_channels(self.channels)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, CoreError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a snapshot from disk, choosing the format by file extension.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Snapshot(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            Some("toml") => Self::from_toml(&contents),
            other => Err(CoreError::Snapshot(format!(
                "unsupported snapshot extension {:?} (expected .json or .toml)",
                other.unwrap_or("")
            ))),
        }
    }
}
