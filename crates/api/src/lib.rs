//! HTTP front end of the extgate update service.
//!
//! Wires the [`UpdateEngine`](extgate_engine::UpdateEngine) into an axum
//! router, and provides configuration and logging setup for the `extgate`
//! binary.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

pub use config::Settings;
pub use error::ApiError;
pub use routes::{AppState, router};
