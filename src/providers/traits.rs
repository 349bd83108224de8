//! Provider trait and per-call options

use super::descriptor::ProviderDescriptor;
use crate::results::SearchResponse;
use async_trait::async_trait;
use serde::Deserialize;

/// Default result limit when the caller supplies none
pub const DEFAULT_LIMIT: &str = "10";
/// Default language when the caller supplies none
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Per-call options supplied by the front-end
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchOptions {
    /// Endpoint override; wins over the descriptor URL when non-empty
    /// after trimming
    pub api_url: Option<String>,
    /// Requested result count, kept as a string for template injection
    pub limit: Option<String>,
    /// Language code, e.g. "en-US"
    pub language: Option<String>,
}

impl SearchOptions {
    /// The effective limit
    pub fn limit_or_default(&self) -> String {
        self.limit
            .clone()
            .unwrap_or_else(|| DEFAULT_LIMIT.to_string())
    }

    /// The effective language
    pub fn language_or_default(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    /// The trimmed URL override, if it actually overrides anything
    pub fn url_override(&self) -> Option<&str> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Contract every search provider implements.
///
/// `search` never fails out of the call: connection, transport, and status
/// problems all fold into the envelope's `error` field.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name used for routing and logging
    fn name(&self) -> &str;

    /// The declarative definition this provider was built from
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Execute a search and normalize the response
    async fn search(&self, query: &str, api_key: &str, options: &SearchOptions) -> SearchResponse;
}
