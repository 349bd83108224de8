//! Generic template-driven search provider
//!
//! Executes any provider that can be described declaratively: the request
//! is assembled by filling the descriptor's URL/header/parameter/payload
//! templates with the call context, the endpoint is probed for
//! reachability, and the JSON response is normalized through the
//! descriptor's response mapping.

use super::descriptor::ProviderDescriptor;
use super::traits::{SearchOptions, SearchProvider};
use crate::error::GatewayError;
use crate::extract;
use crate::network::{header_map, ConnectionManager, HttpClient};
use crate::results::{SearchMetrics, SearchResponse};
use crate::template;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Search provider driven entirely by its descriptor
pub struct GenericProvider {
    descriptor: ProviderDescriptor,
    connection: ConnectionManager,
}

impl GenericProvider {
    /// Create a provider with its own persistent HTTP client
    pub fn new(descriptor: ProviderDescriptor, client: HttpClient) -> Self {
        Self {
            descriptor,
            connection: ConnectionManager::new(client),
        }
    }

    /// The template context for one call
    fn build_context(
        query: &str,
        api_key: &str,
        options: &SearchOptions,
    ) -> HashMap<String, String> {
        HashMap::from([
            ("query".to_string(), query.to_string()),
            ("api_key".to_string(), api_key.to_string()),
            ("limit".to_string(), options.limit_or_default()),
            ("language".to_string(), options.language_or_default()),
        ])
    }

    async fn execute(
        &self,
        query: &str,
        api_key: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, GatewayError> {
        // BuildingRequest: the override wins over the descriptor URL, then
        // the effective URL is itself filled as a template
        let context = Self::build_context(query, api_key, options);
        let base_url = options.url_override().unwrap_or(&self.descriptor.url);
        let url = template::fill_text(base_url, &context);

        let headers = template::fill_map(&self.descriptor.headers, &context);
        let params = template::fill_map(&self.descriptor.params, &context);
        let payload = template::fill_map(&self.descriptor.payload, &context);

        info!(
            provider = %self.descriptor.name,
            method = %self.descriptor.method,
            %url,
            headers = ?masked_headers(&headers),
            "dispatching search"
        );

        // ConnectionCheck: probe latency is not part of the metrics
        let header_map = header_map(&headers);
        self.connection.ensure_ready(&url, &header_map).await?;

        // Requesting
        let client = self.connection.client();
        let mut request = if self.descriptor.is_post() {
            client.inner().post(&url)
        } else {
            client.inner().get(&url)
        };
        request = request
            .headers(header_map)
            .timeout(client.request_timeout());
        if !params.is_empty() {
            request = request.query(&query_pairs(&params));
        }
        if !payload.is_empty() {
            request = request.json(&Value::Object(payload));
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(GatewayError::request)?;
        let body = response.bytes().await.map_err(GatewayError::request)?;
        let latency = started.elapsed();

        // ParsingResponse: a body that is not JSON yields no results
        // rather than failing the call
        let document: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
            debug!(provider = %self.descriptor.name, error = %e, "response body is not JSON");
            Value::Object(Map::new())
        });

        // Normalizing
        let results = extract::extract(&document, &self.descriptor.response_mapping);
        debug!(
            provider = %self.descriptor.name,
            count = results.len(),
            elapsed = ?latency,
            "search completed"
        );

        Ok(SearchResponse::success(
            results,
            SearchMetrics::new(latency.as_secs_f64() * 1000.0, body.len() as u64),
        ))
    }
}

#[async_trait]
impl SearchProvider for GenericProvider {
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
                warn!(provider = %self.descriptor.name, error = %err, "search failed");
                SearchResponse::from(err)
            }
        }
    }
}

/// Render filled params as query pairs, keeping scalars only
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((k.clone(), rendered))
        })
        .collect()
}

/// Copy of the filled headers safe to surface in diagnostics
fn masked_headers(headers: &Map<String, Value>) -> Map<String, Value> {
    headers
        .iter()
        .map(|(k, v)| {
            if k.eq_ignore_ascii_case("authorization") || k.eq_ignore_ascii_case("x-api-key") {
                (k.clone(), Value::String("***".to_string()))
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}
