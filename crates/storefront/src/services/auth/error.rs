//! Authentication error types.

use thiserror::Error;

use super::registration::FieldErrors;
use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more registration fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Username or email is already registered.
    #[error("user already exists")]
    DuplicateUser,

    /// Invalid credentials (wrong password or unknown identifier).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Store error other than a uniqueness conflict.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// Whether this error is a server-side fault rather than bad user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::PasswordHash | Self::Repository(_))
    }
}
