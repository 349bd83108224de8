//! Result envelope type definitions

use crate::error::GatewayError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One normalized result: output field name -> value, in mapping order.
/// The standard field set is `title`, `url`, `snippet`.
pub type ResultEntry = IndexMap<String, String>;

/// Timing and size metrics for a single search call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetrics {
    /// Wall-clock time of the main request, milliseconds, 2 decimals.
    /// Excludes the connection probe.
    pub latency_ms: f64,
    /// Exact byte length of the raw response body
    pub size_bytes: u64,
}

impl SearchMetrics {
    /// Metrics for a completed request
    pub fn new(latency_ms: f64, size_bytes: u64) -> Self {
        Self {
            latency_ms: round2(latency_ms),
            size_bytes,
        }
    }

    /// Zeroed metrics, used on every failure path
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// The complete search result envelope.
///
/// Field names are the wire contract: `results`, `metrics` (`latencyMs`,
/// `sizeBytes`), and `error`. The latter is present only on failure, in
/// which case `results` is empty and metrics are zeroed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<ResultEntry>,
    pub metrics: SearchMetrics,
}

impl SearchResponse {
    /// Successful envelope with results and measured metrics
    pub fn success(results: Vec<ResultEntry>, metrics: SearchMetrics) -> Self {
        Self {
            error: None,
            results,
            metrics,
        }
    }

    /// Failure envelope: message set, no results, zeroed metrics
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            results: Vec::new(),
            metrics: SearchMetrics::zeroed(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<GatewayError> for SearchResponse {
    fn from(err: GatewayError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Round to two decimal places for the wire format
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
