//! Configuration module
//!
//! Handles loading gateway settings from YAML files and environment
//! variables. Settings are constructed once at startup and passed down
//! explicitly; there is no global configuration state.

mod settings;

pub use settings::*;
