//! Result envelope types
//!
//! The normalized shape every provider returns and the front-end serializes
//! to callers.

mod types;

pub use types::*;
