//! Authentication service.
//!
//! Provides account registration and password login against the
//! [`UserStore`].

mod credentials;
mod error;
pub mod registration;

pub use error::AuthError;
pub use registration::{Field, FieldError, FieldErrors, RegistrationForm};

use secrecy::ExposeSecret;
use serde::Serialize;

use crate::db::{RepositoryError, UserStore};
use crate::models::user::{User, UserSummary};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Shown when a registration collides with an existing username or email.
pub const DUPLICATE_USER_MESSAGE: &str = "Username or Email already exists. Try logging in.";

/// Shown for every failed login, whichever part was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username/email or password.";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user: UserSummary,
    /// Opaque token handed to the client. Not stored server-side.
    pub token: String,
}

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: &'a UserStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserStore) -> Self {
        Self { users }
    }

    /// Register a new user from a submitted form.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with every failing field.
    /// Returns `AuthError::DuplicateUser` if the username or email is taken.
    /// Returns `AuthError::PasswordHash` if the password cannot be hashed.
    pub fn register(&self, form: &RegistrationForm) -> Result<User, AuthError> {
        let registration = registration::validate(form)?;

        // The store re-checks under its write lock; this check only avoids
        // hashing a password for a registration that is bound to fail.
        if self
            .users
            .exists(&registration.username, registration.email.as_str())
        {
            return Err(AuthError::DuplicateUser);
        }

        let password_hash = credentials::hash_password(registration.password.expose_secret())?;

        let user = self
            .users
            .create(registration.into_new_user(password_hash))
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUser,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Login with a username or email and a password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the identifier is unknown or
    /// the password is wrong. The two cases are indistinguishable to callers.
    pub fn login(&self, identifier: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let Some(user) = self.users.find_by_email_or_username(identifier) else {
            return Err(credentials::reject_unknown_user(password));
        };

        credentials::verify_password(password, &user.password_hash)?;

        Ok(AuthenticatedUser {
            user: user.summary(),
            token: credentials::generate_token(),
        })
    }
}
