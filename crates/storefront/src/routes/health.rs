//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// The user store lives in memory, so the service is ready as soon as the
/// state has been built.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    tracing::debug!(users = state.users().len(), "Readiness probe");
    StatusCode::OK
}
