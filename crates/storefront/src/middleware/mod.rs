//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fills the span field, echoes the header)
//! 4. Login rate limiting (governor, `/api/login` only)

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::login_rate_limiter;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
