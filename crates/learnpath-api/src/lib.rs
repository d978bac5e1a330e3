//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /api/youtube/search` backed by the curation pipeline
//! - Liveness and readiness probes
//! - Rate limiting, input sanitization and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::create_router;
pub use state::{AppState, Credentials};
