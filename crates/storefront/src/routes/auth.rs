//! Authentication route handlers.
//!
//! Registration is a classic form post that redirects to the login page.
//! Login is a JSON API called from the login page's script.

use std::fmt;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, set_sentry_user};
use crate::filters;
use crate::models::UserSummary;
use crate::services::auth::{
    AuthError, AuthService, DUPLICATE_USER_MESSAGE, FieldErrors, INVALID_CREDENTIALS_MESSAGE,
    RegistrationForm,
};
use crate::state::AppState;

/// Where a successful registration lands.
pub const REGISTERED_REDIRECT: &str = "/auth/login?registered=true";

/// Body returned when the login request is not valid JSON.
pub const INVALID_LOGIN_REQUEST_MESSAGE: &str = "Invalid login request.";

// =============================================================================
// Request / Response Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Set after a successful registration.
    #[serde(default)]
    pub registered: bool,
}

/// JSON login request. `username` may hold a username or an email.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// JSON login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            user: None,
            token: None,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub registered: bool,
}

/// Register page template.
///
/// `form` is echoed back into the inputs on a failed attempt. Its password is
/// always blank.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub form: RegistrationForm,
    pub errors: FieldErrors,
    pub registration_error: Option<String>,
}

impl RegisterTemplate {
    fn retry(form: RegistrationForm, errors: FieldErrors, registration_error: Option<String>) -> Self {
        Self {
            form: RegistrationForm {
                password: String::new(),
                ..form
            },
            errors,
            registration_error,
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        form: RegistrationForm::default(),
        errors: FieldErrors::default(),
        registration_error: None,
    }
}

/// Handle registration form submission.
///
/// Redirects to the login page on success. Validation failures and duplicate
/// accounts re-render the form with the submitted values.
///
/// # Errors
///
/// Returns `AppError` if the password cannot be hashed or the store fails.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Result<Response> {
    match AuthService::new(state.users()).register(&form) {
        Ok(user) => {
            let user_id = user.id.to_string();
            add_breadcrumb("auth", "User registered", Some(&[("user_id", user_id.as_str())]));
            Ok(Redirect::to(REGISTERED_REDIRECT).into_response())
        }
        Err(AuthError::Validation(errors)) => {
            tracing::debug!(fields = errors.len(), "Registration failed validation");
            Ok(RegisterTemplate::retry(form, errors, None).into_response())
        }
        Err(AuthError::DuplicateUser) => {
            tracing::info!(username = %form.username, "Registration rejected: duplicate user");
            Ok(RegisterTemplate::retry(
                form,
                FieldErrors::default(),
                Some(DUPLICATE_USER_MESSAGE.to_owned()),
            )
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        registered: query.registered,
    }
}

/// Handle a JSON login request.
///
/// POST /api/login
///
/// The identifier may be a username or an email. Unknown identifiers and wrong
/// passwords produce the same response.
///
/// # Errors
///
/// Returns `AppError` only for internal failures.
#[instrument(skip_all)]
pub async fn api_login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Malformed login request");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(LoginResponse::failure(INVALID_LOGIN_REQUEST_MESSAGE)),
            )
                .into_response());
        }
    };

    match AuthService::new(state.users()).login(&request.username, &request.password) {
        Ok(authenticated) => {
            let user = authenticated.user;
            tracing::info!(user_id = %user.id, username = %user.username, "Login succeeded");
            set_sentry_user(&user.id, &user.username);
            add_breadcrumb("auth", "User logged in", None);

            Ok(Json(LoginResponse {
                success: true,
                message: format!("Welcome back, {}!", user.first_name),
                user: Some(user),
                token: Some(authenticated.token),
            })
            .into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login failed: invalid credentials");
            Ok((
                StatusCode::UNAUTHORIZED,
                Json(LoginResponse::failure(INVALID_CREDENTIALS_MESSAGE)),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
