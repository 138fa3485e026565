//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (catalog)
//! POST /                       - Order submission (renders place-order page)
//! GET  /placeorder             - Place-order page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Auth
//! GET  /auth/login             - Login page
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//!
//! # API
//! POST /api/login              - JSON login (rate limited)
//!
//! # Assets
//! GET  /static/*               - CSS and JS
//! ```

pub mod auth;
pub mod health;
pub mod home;
pub mod orders;

use axum::{
    Router,
    http::Uri,
    middleware::from_fn,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{login_rate_limiter, request_id_middleware};
use crate::state::AppState;

/// Create the auth page routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/register", get(auth::register_page).post(auth::register))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::api_login))
        .layer(login_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page and checkout submission
        .route("/", get(home::home).post(orders::submit_order))
        .route("/placeorder", get(orders::place_order_page))
        // Health checks
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Auth pages
        .nest("/auth", auth_routes())
        // JSON API
        .nest("/api", api_routes())
}

/// Build the complete application router with middleware and state.
///
/// Sentry layers are added by the binary so tests can run without a client.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    // Outermost first: the trace span must exist before the request ID is
    // recorded on it.
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(from_fn(request_id_middleware));

    routes()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(middleware)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}
