//! HTTP request handlers

use super::state::AppState;
use crate::providers::{ProviderDescriptor, SearchOptions};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Listing entry for one configured provider
#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub has_key: bool,
    pub details: ProviderDescriptor,
    pub user_settings: UserSettingsView,
}

/// Stored settings echoed to the front-end; the key itself never leaves
/// the process
#[derive(Debug, Serialize)]
pub struct UserSettingsView {
    pub api_url: String,
    pub limit: String,
    pub language: String,
}

/// Body of a config update
#[derive(Debug, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub provider: Option<String>,
    /// Presence of the field matters: absent is a validation error, empty
    /// clears the stored key
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of a search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_provider() -> String {
    "querit".to_string()
}

/// List configured providers with their stored user settings
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderInfo>> {
    let stored = state.store.load();

    let mut names: Vec<_> = state.registry.names();
    names.sort_unstable();

    let providers = names
        .into_iter()
        .filter_map(|name| state.registry.get(name))
        .map(|provider| {
            let user = stored.get(provider.name()).cloned().unwrap_or_default();
            ProviderInfo {
                name: provider.name().to_string(),
                has_key: !user.api_key.is_empty(),
                details: provider.descriptor().clone(),
                user_settings: UserSettingsView {
                    api_url: user.api_url,
                    limit: user.limit,
                    language: user.language,
                },
            }
        })
        .collect();

    Json(providers)
}

/// Store or clear a provider's API key and search preferences
pub async fn update_config(
    State(state): State<AppState>,
    Json(body): Json<ConfigUpdate>,
) -> (StatusCode, Json<Value>) {
    let Some(provider) = body.provider.filter(|p| !p.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Provider name is required"})),
        );
    };

    let Some(api_key) = body.api_key else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "API Key field is missing"})),
        );
    };

    let mut stored = state.store.load();

    if api_key.is_empty() {
        // An empty key clears the stored credential but keeps the rest
        if let Some(entry) = stored.get_mut(&provider) {
            entry.api_key = String::new();
        }
    } else {
        let entry = stored.entry(provider).or_default();
        entry.api_key = api_key;
        entry.api_url = body.api_url.map(|u| u.trim().to_string()).unwrap_or_default();
        if let Some(limit) = body.limit {
            entry.limit = limit;
        }
        if let Some(language) = body.language {
            entry.language = language;
        }
    }

    if let Err(e) = state.store.save(&stored) {
        tracing::error!(error = %e, "failed to save user config");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to save configuration"})),
        );
    }

    (StatusCode::OK, Json(json!({"status": "success"})))
}

/// Dispatch a search to the named provider
pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> (StatusCode, Json<Value>) {
    let stored = state.store.load();
    let user = stored.get(&body.provider).cloned();

    // A key in the request wins; otherwise fall back to the stored one
    let api_key = body
        .api_key
        .filter(|k| !k.is_empty())
        .or_else(|| {
            user.as_ref()
                .map(|u| u.api_key.clone())
                .filter(|k| !k.is_empty())
        });

    let Some(api_key) = api_key else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": format!(
                    "API Key for {} is missing. Please configure it.",
                    body.provider
                )
            })),
        );
    };

    let Some(provider) = state.registry.get(&body.provider) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Provider not found"})),
        );
    };

    let options = match user {
        Some(user) => SearchOptions {
            api_url: Some(user.api_url),
            limit: Some(user.limit),
            language: Some(user.language),
        },
        None => SearchOptions::default(),
    };

    let response = provider.search(&body.query, &api_key, &options).await;

    // Provider failures stay 200: the envelope's error field is the
    // contract, not the transport status
    match serde_json::to_value(&response) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize search response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal serialization error"})),
            )
        }
    }
}

/// Liveness endpoint
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "version": crate::VERSION}))
}
