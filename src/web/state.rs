//! Application state shared across handlers

use crate::config::Settings;
use crate::providers::ProviderRegistry;
use crate::store::UserStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Provider registry
    pub registry: Arc<ProviderRegistry>,
    /// User settings store
    pub store: Arc<UserStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: ProviderRegistry, store: UserStore) -> Self {
        Self {
            settings: Arc::new(settings),
            registry: Arc::new(registry),
            store: Arc::new(store),
        }
    }
}
