//! Provider registry: loads descriptors and instantiates providers

use super::descriptor::{ProviderDescriptor, KIND_QUERIT};
use super::generic::GenericProvider;
use super::querit::QueritProvider;
use super::traits::SearchProvider;
use crate::config::OutgoingSettings;
use crate::error::GatewayError;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Registry of all configured search providers.
///
/// Built once at startup from the providers YAML file and read-only
/// afterwards; instances are shared across concurrent calls via `Arc`.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SearchProvider>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Load providers from a YAML file.
    ///
    /// A missing file is not an error: it logs a warning and yields an
    /// empty registry. A file that exists but cannot be read or parsed is
    /// a configuration error.
    pub fn load(path: &Path, outgoing: &OutgoingSettings) -> Result<Self, GatewayError> {
        if !path.exists() {
            warn!(path = %path.display(), "provider config file not found");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content, outgoing)
    }

    /// Build a registry from YAML content: a mapping from provider name to
    /// descriptor fields. Each descriptor gets its `name` injected from
    /// its key, and the `type` tag selects the implementation.
    pub fn from_yaml(content: &str, outgoing: &OutgoingSettings) -> Result<Self, GatewayError> {
        let configs: IndexMap<String, ProviderDescriptor> =
            serde_yaml::from_str(content).map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut providers: HashMap<String, Arc<dyn SearchProvider>> = HashMap::new();
        for (name, mut descriptor) in configs {
            descriptor.name = name.clone();

            // One client per provider instance; warm-up state is never
            // shared across providers
            let client = crate::network::HttpClient::with_settings(outgoing)
                .map_err(|e| GatewayError::Config(e.to_string()))?;

            let provider: Arc<dyn SearchProvider> = match descriptor.kind.as_str() {
                KIND_QUERIT => Arc::new(QueritProvider::new(descriptor, client)),
                _ => Arc::new(GenericProvider::new(descriptor, client)),
            };

            info!(provider = %name, kind = %provider.descriptor().kind, "loaded provider");
            providers.insert(name, provider);
        }

        info!("loaded {} providers", providers.len());
        Ok(Self { providers })
    }

    /// Get a provider by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn SearchProvider>> {
        self.providers.get(name).cloned()
    }

    /// All provider names
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a provider exists
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Iterate over providers
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn SearchProvider>)> {
        self.providers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
