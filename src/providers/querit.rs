//! Querit vendor-native search provider
//!
//! Talks to Querit's REST search API directly with typed request and
//! response models instead of going through the template engine. Satisfies
//! the same `SearchProvider` contract as the generic provider; the registry
//! selects it for descriptors tagged `type: querit`.

use super::descriptor::ProviderDescriptor;
use super::traits::{SearchOptions, SearchProvider};
use crate::error::GatewayError;
use crate::network::HttpClient;
use crate::results::{ResultEntry, SearchMetrics, SearchResponse};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// Default Querit search endpoint
pub const QUERIT_API_URL: &str = "https://api.querit.com/v1/search";

/// Search provider backed by Querit's own API
pub struct QueritProvider {
    descriptor: ProviderDescriptor,
    client: HttpClient,
}

#[derive(Debug, Serialize)]
struct QueritRequest<'a> {
    query: &'a str,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct QueritResponse {
    #[serde(default)]
    results: Vec<QueritItem>,
}

#[derive(Debug, Default, Deserialize)]
struct QueritItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    description: String,
}

impl QueritProvider {
    pub fn new(descriptor: ProviderDescriptor, client: HttpClient) -> Self {
        Self { descriptor, client }
    }

    /// Endpoint from the descriptor when configured, Querit's default
    /// otherwise
    fn endpoint(&self) -> &str {
        if self.descriptor.url.is_empty() {
            QUERIT_API_URL
        } else {
            &self.descriptor.url
        }
    }

    async fn execute(
        &self,
        query: &str,
        api_key: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, GatewayError> {
        let count: u32 = options.limit_or_default().parse().unwrap_or(10);

        info!(provider = %self.descriptor.name, count, "querit search");

        let started = Instant::now();
        let response = self
            .client
            .inner()
            .post(self.endpoint())
            .bearer_auth(api_key.trim())
            .json(&QueritRequest { query, count })
            .timeout(self.client.request_timeout())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(GatewayError::request)?;
        let parsed: QueritResponse = response.json().await.map_err(GatewayError::request)?;
        let latency = started.elapsed();

        let results: Vec<ResultEntry> = parsed
            .results
            .into_iter()
            .map(|item| {
                // Fall back to the description when no snippet is present
                let snippet = if item.snippet.is_empty() {
                    item.description
                } else {
                    item.snippet
                };
                IndexMap::from([
                    ("title".to_string(), item.title),
                    ("url".to_string(), item.url),
                    ("snippet".to_string(), snippet),
                ])
            })
            .collect();

        // The API client consumes the raw body, so the size metric is the
        // serialized normalized results
        let size_bytes = serde_json::to_vec(&results).map(|b| b.len()).unwrap_or(0) as u64;

        Ok(SearchResponse::success(
            results,
            SearchMetrics::new(latency.as_secs_f64() * 1000.0, size_bytes),
        ))
    }
}

#[async_trait]
impl SearchProvider for QueritProvider {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn search(&self, query: &str, api_key: &str, options: &SearchOptions) -> SearchResponse {
        match self.execute(query, api_key, options).await {
            Ok(response) => response,
            Err(err) => {
                warn!(provider = %self.descriptor.name, error = %err, "querit search failed");
                SearchResponse::from(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(url: String) -> QueritProvider {
        let descriptor = ProviderDescriptor {
            name: "querit".to_string(),
            kind: "querit".to_string(),
            url,
            ..Default::default()
        };
        QueritProvider::new(descriptor, HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_search_normalizes_sdk_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/search"))
            .and(header("Authorization", "Bearer secret"))
            .and(body_json(json!({"query": "rust", "count": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"title": "A", "url": "http://a", "snippet": "direct"},
                    {"title": "B", "url": "http://b", "description": "fallback"}
                ]
            })))
            .mount(&server)
            .await;

        let provider = provider(format!("{}/v1/search", server.uri()));
        let options = SearchOptions {
            limit: Some("5".to_string()),
            ..Default::default()
        };
        // Keys arrive with stray whitespace from copy-paste
        let response = provider.search("rust", " secret ", &options).await;

        assert!(!response.is_error());
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0]["snippet"], "direct");
        assert_eq!(response.results[1]["snippet"], "fallback");
        assert!(response.metrics.size_bytes > 0);
    }

    #[tokio::test]
    async fn test_api_error_yields_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = provider(server.uri());
        let response = provider.search("rust", "bad", &SearchOptions::default()).await;

        assert!(response.error.is_some());
        assert!(response.results.is_empty());
        assert_eq!(response.metrics, SearchMetrics::zeroed());
    }

    #[tokio::test]
    async fn test_unparseable_limit_defaults_to_ten() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"query": "q", "count": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider(server.uri());
        let options = SearchOptions {
            limit: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(!provider.search("q", "k", &options).await.is_error());
    }

    #[test]
    fn test_default_endpoint() {
        let provider = provider(String::new());
        assert_eq!(provider.endpoint(), QUERIT_API_URL);
    }
}
