//! In-memory user store.
//!
//! Users are keyed by username with a secondary index on email. Uniqueness of
//! both keys is enforced inside [`UserStore::create`] while holding the write
//! lock, so concurrent registrations cannot both pass the check.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use grocify_core::UserId;

use super::RepositoryError;
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    /// username -> user
    users: HashMap<String, User>,
    /// email -> username
    email_index: HashMap<String, String>,
    /// Highest ID handed out so far.
    last_id: Option<UserId>,
}

impl Tables {
    fn next_id(&self) -> Result<UserId, RepositoryError> {
        match self.last_id {
            Some(last) => last.next().ok_or(RepositoryError::IdExhausted),
            None => Ok(UserId::FIRST),
        }
    }
}

/// Shared user store.
///
/// Cheap to clone; all clones see the same data.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Tables>>,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every write finishes its checks before mutating, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new user, assigning the next ID.
    ///
    /// The first user gets [`UserId::FIRST`]; every later user gets the
    /// highest existing ID plus one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is taken.
    /// Returns `RepositoryError::IdExhausted` if no ID is left to assign.
    pub fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.write();

        if tables.users.contains_key(&new_user.username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        if tables.email_index.contains_key(new_user.email.as_str()) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let id = tables.next_id()?;
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone: new_user.phone,
            address: new_user.address,
            landmark: new_user.landmark,
            pincode: new_user.pincode,
            created_at: Utc::now(),
        };

        tables
            .email_index
            .insert(user.email.as_str().to_owned(), user.username.clone());
        tables.users.insert(user.username.clone(), user.clone());
        tables.last_id = Some(id);

        Ok(user)
    }

    /// Get a user by exact username.
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.read().users.get(username).cloned()
    }

    /// Get a user by exact email address.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let tables = self.read();
        tables
            .email_index
            .get(email)
            .and_then(|username| tables.users.get(username))
            .cloned()
    }

    /// Resolve a login identifier: username first, then email.
    #[must_use]
    pub fn find_by_email_or_username(&self, identifier: &str) -> Option<User> {
        let tables = self.read();
        tables
            .users
            .get(identifier)
            .or_else(|| {
                tables
                    .email_index
                    .get(identifier)
                    .and_then(|username| tables.users.get(username))
            })
            .cloned()
    }

    /// Whether any user already has this username or this email.
    #[must_use]
    pub fn exists(&self, username: &str, email: &str) -> bool {
        let tables = self.read();
        tables.users.contains_key(username) || tables.email_index.contains_key(email)
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().users.len()
    }

    /// Whether the store has no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().users.is_empty()
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("users", &self.len())
            .finish()
    }
}
