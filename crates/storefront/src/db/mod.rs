//! Storage for storefront data.
//!
//! # Stores
//!
//! - `users` - Registered storefront accounts
//!
//! Data lives in process memory and is lost on restart. Each store is built
//! once in [`crate::state::AppState::new`] and shared with every handler
//! through the state, never through globals.

pub mod users;

pub use users::UserStore;

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Constraint violation (e.g., unique username or email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// No further IDs can be assigned.
    #[error("user id space exhausted")]
    IdExhausted,
}
