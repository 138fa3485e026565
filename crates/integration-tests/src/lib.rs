//! Integration tests for the Grocify storefront.
//!
//! Each test starts the real router on an ephemeral port and talks to it over
//! HTTP. No external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grocify-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_registration` - Registration form, validation, duplicates
//! - `storefront_login` - JSON login API
//! - `storefront_orders` - Checkout submission and pages

use std::net::SocketAddr;
use std::path::PathBuf;

use grocify_storefront::config::{DemoUserConfig, StorefrontConfig};
use grocify_storefront::db::UserStore;
use grocify_storefront::routes;
use grocify_storefront::state::AppState;
use reqwest::{Client, redirect};
use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Username of the seeded demo account.
pub const DEMO_USERNAME: &str = "grouser";
/// Email of the seeded demo account.
pub const DEMO_EMAIL: &str = "user@grocify.com";
/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "securepass";

/// A storefront served on `127.0.0.1` with an OS-assigned port.
///
/// The server task is aborted when the value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    state: AppState,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront with an empty user store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::with_config(test_config()).await
    }

    /// Start a storefront with the demo account seeded.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn with_demo_user() -> Self {
        Self::with_config(StorefrontConfig {
            demo_user: Some(DemoUserConfig {
                username: DEMO_USERNAME.to_string(),
                email: DEMO_EMAIL.to_string(),
                password: SecretString::from(DEMO_PASSWORD),
            }),
            ..test_config()
        })
        .await
    }

    /// Start a storefront with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built or the listener cannot be bound.
    pub async fn with_config(config: StorefrontConfig) -> Self {
        let state = AppState::new(config).expect("Failed to build application state");
        let app = routes::app(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server error");
        });

        // Redirects are asserted on, never followed
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            addr,
            state,
            client,
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The user store behind the running server.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        self.state.users()
    }

    /// HTTP client that does not follow redirects.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Default configuration pointed at the storefront's static assets.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        ..StorefrontConfig::default()
    }
}

/// A complete, valid registration form.
///
/// Keys match the field names the register page submits.
#[must_use]
pub fn registration_form(username: &str, email: &str) -> Vec<(&'static str, String)> {
    vec![
        ("username", username.to_string()),
        ("password", "correcthorse".to_string()),
        ("firstName", "Asha".to_string()),
        ("lastName", "Rao".to_string()),
        ("email", email.to_string()),
        ("phone", "9876543210".to_string()),
        ("address", "12 MG Road".to_string()),
        ("landmark", String::new()),
        ("pincode", "560001".to_string()),
    ]
}
