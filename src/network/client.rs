//! HTTP client and connection warm-up for provider requests

use crate::config::OutgoingSettings;
use crate::error::GatewayError;
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

/// HTTP client wrapper with gateway-specific configuration.
///
/// Wraps one `reqwest::Client` so connections are pooled and reused across
/// calls. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&settings.user_agent)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
            probe_timeout: Duration::from_secs_f64(settings.probe_timeout),
            request_timeout: Duration::from_secs_f64(settings.request_timeout),
        })
    }

    /// The underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Timeout for the reachability probe
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Timeout for the main search request
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

/// Tracks which URL the connection was last verified against
#[derive(Debug, Default)]
struct ConnectionState {
    warmed_url: Option<String>,
    ready: bool,
}

/// Per-provider connection manager.
///
/// Keeps the provider's HTTP client together with its warm-up state and
/// verifies reachability of the current target URL before the real request
/// is issued. The state is mutex-guarded so concurrent calls for the same
/// provider serialize their probe checks instead of clobbering each other.
pub struct ConnectionManager {
    client: HttpClient,
    state: Mutex<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            state: Mutex::new(ConnectionState::default()),
        }
    }

    /// The client this manager warms up
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Verify the endpoint is reachable, probing only when the URL changed
    /// or the connection was never marked ready.
    ///
    /// The probe is a header-only request with the short timeout; its
    /// latency and bytes never count toward search metrics. Probe failure
    /// marks the connection not-ready and surfaces as a connection error.
    pub async fn ensure_ready(&self, url: &str, headers: &HeaderMap) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;

        if state.ready && state.warmed_url.as_deref() == Some(url) {
            return Ok(());
        }

        if let Err(e) = Url::parse(url) {
            state.ready = false;
            return Err(GatewayError::connection(format!("invalid URL {url:?}: {e}")));
        }

        let probe = self
            .client
            .inner()
            .head(url)
            .headers(headers.clone())
            .timeout(self.client.probe_timeout())
            .send()
            .await;

        match probe {
            Ok(_) => {
                state.ready = true;
                state.warmed_url = Some(url.to_string());
                debug!(url, "connection warmed");
                Ok(())
            }
            Err(e) => {
                state.ready = false;
                warn!(url, error = %e, "connection warm-up failed");
                Err(GatewayError::connection(e))
            }
        }
    }
}

/// Convert a filled header template into a reqwest header map.
///
/// Scalar values are rendered as strings; nested values and names or
/// values that are not valid HTTP are skipped.
pub fn header_map(headers: &Map<String, Value>) -> HeaderMap {
    let mut map = HeaderMap::new();

    for (name, value) in headers {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };

        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            warn!(header = name.as_str(), "skipping invalid header name");
            continue;
        };
        let Ok(value) = HeaderValue::from_str(&rendered) else {
            warn!(header = name.as_str(), "skipping invalid header value");
            continue;
        };
        map.insert(name, value);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_probe_runs_once_for_same_url() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let manager = ConnectionManager::new(HttpClient::new().unwrap());
        let headers = HeaderMap::new();

        manager.ensure_ready(&server.uri(), &headers).await.unwrap();
        manager.ensure_ready(&server.uri(), &headers).await.unwrap();
    }

    #[tokio::test]
    async fn test_url_change_triggers_fresh_probe() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        for server in [&first, &second] {
            Mock::given(method("HEAD"))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(server)
                .await;
        }

        let manager = ConnectionManager::new(HttpClient::new().unwrap());
        let headers = HeaderMap::new();

        manager.ensure_ready(&first.uri(), &headers).await.unwrap();
        manager.ensure_ready(&second.uri(), &headers).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        let manager = ConnectionManager::new(HttpClient::new().unwrap());
        let headers = HeaderMap::new();

        let err = manager
            .ensure_ready("http://127.0.0.1:1/", &headers)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Connection failed:"));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_probe() {
        let manager = ConnectionManager::new(HttpClient::new().unwrap());
        let err = manager
            .ensure_ready("not a url", &HeaderMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Connection(_)));
    }

    #[test]
    fn test_header_map_renders_scalars_and_skips_nested() {
        let headers = json!({
            "Authorization": "Bearer k",
            "X-Count": 3,
            "X-Nested": {"bad": true}
        });
        let Value::Object(headers) = headers else { unreachable!() };

        let map = header_map(&headers);
        assert_eq!(map.get("Authorization").unwrap(), "Bearer k");
        assert_eq!(map.get("X-Count").unwrap(), "3");
        assert!(map.get("X-Nested").is_none());
    }
}
