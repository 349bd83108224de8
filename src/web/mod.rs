//! HTTP front-end
//!
//! Thin axum layer over the provider registry and the user settings
//! store. The core never decides user-facing status codes; that mapping
//! lives entirely in the handlers here.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
