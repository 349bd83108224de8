//! Error types for the gateway core

use thiserror::Error;

/// Errors produced while executing a search against a provider.
///
/// None of these escape a `search` call: the executor folds every failure
/// into the result envelope's `error` field. The variants exist so callers
/// inside the crate can tell a dead endpoint from a failed request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The reachability probe failed before the real request was sent
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Transport failure or non-2xx status on the main request
    #[error("{0}")]
    Request(String),

    /// Provider configuration could not be loaded or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Wrap a transport error from the probe step
    pub fn connection(err: impl std::fmt::Display) -> Self {
        Self::Connection(err.to_string())
    }

    /// Wrap a transport or status error from the main request
    pub fn request(err: impl std::fmt::Display) -> Self {
        Self::Request(err.to_string())
    }
}
