//! Settings structures for gateway configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    /// Path to the provider definitions file; resolved against the usual
    /// candidates when unset
    pub providers_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SEARCHGATE_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SEARCHGATE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SEARCHGATE_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("SEARCHGATE_PROVIDERS") {
            self.providers_file = Some(PathBuf::from(val));
        }
    }

    /// Resolve the provider definitions file, trying the configured path
    /// first and falling back to the conventional locations.
    pub fn resolve_providers_file(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.providers_file {
            return Some(path.clone());
        }

        let candidates = [
            PathBuf::from("providers.yaml"),
            PathBuf::from("config/providers.yaml"),
            dirs::config_dir()
                .map(|p| p.join("searchgate/providers.yaml"))
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|p| p.exists())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Directory of built front-end assets to serve, if any
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8889,
            bind_address: "127.0.0.1".to_string(),
            static_dir: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Connection probe timeout in seconds
    pub probe_timeout: f64,
    /// Main request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// User agent sent on outgoing requests
    pub user_agent: String,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            probe_timeout: crate::PROBE_TIMEOUT as f64,
            request_timeout: crate::REQUEST_TIMEOUT as f64,
            pool_maxsize: 20,
            verify_ssl: true,
            user_agent: format!("searchgate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
