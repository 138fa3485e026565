//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::{DemoUserConfig, StorefrontConfig};
use crate::db::UserStore;
use crate::services::auth::{AuthError, AuthService, RegistrationForm};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to seed demo user: {0}")]
    DemoUser(#[from] AuthError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the user store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    users: UserStore,
}

impl AppState {
    /// Create a new application state with an empty user store.
    ///
    /// Seeds the demo account when `config.demo_user` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo account cannot be registered.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let users = UserStore::new();

        if let Some(demo) = &config.demo_user {
            seed_demo_user(&users, demo)?;
        }

        Ok(Self::with_users(config, users))
    }

    /// Create application state around an existing user store.
    #[must_use]
    pub fn with_users(config: StorefrontConfig, users: UserStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, users }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }
}

/// Register the demo account through the normal registration path.
fn seed_demo_user(users: &UserStore, demo: &DemoUserConfig) -> Result<(), AuthError> {
    let form = RegistrationForm {
        username: demo.username.clone(),
        password: demo.password.expose_secret().to_owned(),
        first_name: "Grocify".to_string(),
        last_name: "Shopper".to_string(),
        email: demo.email.clone(),
        phone: "9876543210".to_string(),
        address: "1 Market Street".to_string(),
        landmark: String::new(),
        pincode: "560001".to_string(),
    };

    let user = AuthService::new(users).register(&form)?;
    tracing::info!(user_id = %user.id, username = %user.username, "Demo user seeded");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocify_core::UserId;
    use secrecy::SecretString;

    use super::*;

    fn demo_config() -> StorefrontConfig {
        StorefrontConfig {
            demo_user: Some(DemoUserConfig {
                username: "grouser".to_string(),
                email: "user@grocify.com".to_string(),
                password: SecretString::from("securepass"),
            }),
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_new_without_demo_user_is_empty() {
        let state = AppState::new(StorefrontConfig::default()).unwrap();
        assert!(state.users().is_empty());
    }

    #[test]
    fn test_demo_user_seeded_with_first_id() {
        let state = AppState::new(demo_config()).unwrap();

        let user = state.users().find_by_username("grouser").unwrap();
        assert_eq!(user.id, UserId::FIRST);
        assert_eq!(user.first_name, "Grocify");
        assert!(
            AuthService::new(state.users())
                .login("user@grocify.com", "securepass")
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_demo_email_fails() {
        let mut config = demo_config();
        if let Some(demo) = config.demo_user.as_mut() {
            demo.email = "not-an-email".to_string();
        }
        assert!(matches!(
            AppState::new(config),
            Err(StateError::DemoUser(AuthError::Validation(_)))
        ));
    }

    #[test]
    fn test_clones_share_store() {
        let state = AppState::new(demo_config()).unwrap();
        let clone = state.clone();
        assert_eq!(clone.users().len(), state.users().len());
        assert!(std::ptr::eq(clone.config(), state.config()));
    }
}
