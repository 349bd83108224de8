//! HTTP networking module
//!
//! Provides the shared HTTP client and the per-provider connection
//! manager that verifies endpoint reachability before real requests.

mod client;

pub use client::{header_map, ConnectionManager, HttpClient};
