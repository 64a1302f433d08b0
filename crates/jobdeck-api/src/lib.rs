//! HTTP server exposing jobdeck dashboards.
//!
//! Serves the per-team and administrative job dashboards as JSON.

pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;
