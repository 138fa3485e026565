//! User domain types.
//!
//! These types represent validated domain objects. The stored credential never
//! leaves the server: clients only ever see a [`UserSummary`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use grocify_core::{Email, PhoneNumber, Pincode, UserId};

/// A registered storefront user (domain type).
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique, case-sensitive login name.
    pub username: String,
    /// Unique email address, also accepted as a login identifier.
    pub email: Email,
    /// Argon2id PHC string for the user's password.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: PhoneNumber,
    pub address: String,
    pub landmark: Option<String>,
    pub pincode: Pincode,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The client-safe projection of this user.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
        }
    }
}

// Keeps the password hash and contact details out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Fields for a user that has not been stored yet.
///
/// The store assigns `id` and `created_at` on insert.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: PhoneNumber,
    pub address: String,
    pub landmark: Option<String>,
    pub pincode: Pincode,
}

/// Safe user details returned to clients after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
}
