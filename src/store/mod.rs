//! On-disk user settings store
//!
//! Persists per-provider API keys and search preferences as JSON in the
//! user's home directory. The gateway only depends on the read/write
//! contract here; the front-end decides what gets stored when.

use crate::providers::{DEFAULT_LANGUAGE, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Stored settings for one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredProviderSettings {
    pub api_key: String,
    pub api_url: String,
    pub limit: String,
    pub language: String,
}

impl Default for StoredProviderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: String::new(),
            limit: DEFAULT_LIMIT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// On-disk entry form. Early versions stored a bare API-key string per
/// provider; those entries still load and are upgraded on the next save.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Legacy(String),
    Settings(StoredProviderSettings),
}

impl From<StoredEntry> for StoredProviderSettings {
    fn from(entry: StoredEntry) -> Self {
        match entry {
            StoredEntry::Legacy(api_key) => Self {
                api_key,
                ..Default::default()
            },
            StoredEntry::Settings(settings) => settings,
        }
    }
}

/// User settings store rooted at a config file path
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Store under the given directory (created on save if needed)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("config.json"),
        }
    }

    /// Store in the default location, `~/.searchgate`
    pub fn default_location() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join(".searchgate"))
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all stored provider settings.
    ///
    /// A missing file yields an empty map; an unreadable or corrupt file
    /// also yields an empty map, with a warning, so a damaged config never
    /// takes the gateway down.
    pub fn load(&self) -> HashMap<String, StoredProviderSettings> {
        if !self.path.exists() {
            return HashMap::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read user config");
                return HashMap::new();
            }
        };

        match serde_json::from_str::<HashMap<String, StoredEntry>>(&content) {
            Ok(entries) => entries
                .into_iter()
                .map(|(name, entry)| (name, entry.into()))
                .collect(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse user config");
                HashMap::new()
            }
        }
    }

    /// Persist all provider settings, creating the parent directory if
    /// needed.
    pub fn save(&self, settings: &HashMap<String, StoredProviderSettings>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)
    }
}
