//! Integration tests for the registration form.

#![allow(clippy::unwrap_used)]

use grocify_core::UserId;
use grocify_integration_tests::{TestServer, registration_form};
use reqwest::{StatusCode, header::LOCATION};

const DUPLICATE: &str = "Username or Email already exists. Try logging in.";

async fn register(server: &TestServer, form: &[(&str, String)]) -> reqwest::Response {
    server
        .client()
        .post(server.url("/auth/register"))
        .form(form)
        .send()
        .await
        .unwrap()
}

fn with_field(
    mut form: Vec<(&'static str, String)>,
    key: &str,
    value: &str,
) -> Vec<(&'static str, String)> {
    for (k, v) in &mut form {
        if *k == key {
            *v = value.to_string();
        }
    }
    form
}

#[tokio::test]
async fn test_register_page_renders() {
    let server = TestServer::start().await;

    let resp = server
        .client()
        .get(server.url("/auth/register"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("name=\"firstName\""));
    assert!(body.contains("name=\"pincode\""));
}

#[tokio::test]
async fn test_successful_registration_redirects_to_login() {
    let server = TestServer::start().await;

    let resp = register(&server, &registration_form("asha", "asha@example.com")).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "/auth/login?registered=true"
    );

    let user = server.users().find_by_username("asha").unwrap();
    assert_eq!(user.id, UserId::FIRST);
    assert_eq!(user.email.as_str(), "asha@example.com");
    assert!(user.landmark.is_none());
    assert_ne!(user.password_hash, "correcthorse");

    let login = server
        .client()
        .get(server.url("/auth/login?registered=true"))
        .send()
        .await
        .unwrap();
    assert!(login.text().await.unwrap().contains("Registration successful"));
}

#[tokio::test]
async fn test_ids_are_sequential_from_seed() {
    let server = TestServer::start().await;

    for (username, email) in [
        ("asha", "asha@example.com"),
        ("ravi", "ravi@example.com"),
        ("meera", "meera@example.com"),
    ] {
        let resp = register(&server, &registration_form(username, email)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    let ids: Vec<i32> = ["asha", "ravi", "meera"]
        .iter()
        .map(|u| server.users().find_by_username(u).unwrap().id.as_i32())
        .collect();
    assert_eq!(ids, vec![201, 202, 203]);
}

#[tokio::test]
async fn test_missing_field_names_that_field() {
    let server = TestServer::start().await;
    let form = with_field(
        registration_form("asha", "asha@example.com"),
        "firstName",
        "   ",
    );

    let resp = register(&server, &form).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("First Name is required."));
    assert!(!body.contains("Last Name is required."));
    assert!(server.users().is_empty());
}

#[tokio::test]
async fn test_empty_form_reports_every_required_field() {
    let server = TestServer::start().await;

    let resp = register(&server, &[]).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    for message in [
        "Username is required.",
        "Password is required.",
        "First Name is required.",
        "Last Name is required.",
        "Email ID is required.",
        "Phone Number is required.",
        "Address is required.",
        "Pin Code is required.",
    ] {
        assert!(body.contains(message), "missing {message:?}");
    }
    assert!(server.users().is_empty());
}

#[tokio::test]
async fn test_format_errors_rerender_values_without_password() {
    let server = TestServer::start().await;
    let mut form = registration_form("asha", "not-an-email");
    form = with_field(form, "phone", "98765");
    form = with_field(form, "pincode", "56001");
    form = with_field(form, "password", "short");

    let resp = register(&server, &form).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Invalid email format (e.g., user@domain.com)."));
    assert!(body.contains("Phone number must be exactly 10 digits."));
    assert!(body.contains("Pin code must be a 6-digit number."));
    assert!(body.contains("Password must be at least 8 characters long."));

    // Submitted values come back, the password never does
    assert!(body.contains("value=\"asha\""));
    assert!(body.contains("value=\"not-an-email\""));
    assert!(!body.contains("value=\"short\""));
    assert!(server.users().is_empty());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let server = TestServer::start().await;
    register(&server, &registration_form("asha", "asha@example.com")).await;

    let resp = register(&server, &registration_form("asha", "other@example.com")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains(DUPLICATE));
    assert_eq!(server.users().len(), 1);
    assert_eq!(
        server
            .users()
            .find_by_username("asha")
            .unwrap()
            .email
            .as_str(),
        "asha@example.com"
    );
    assert!(server.users().find_by_email("other@example.com").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let server = TestServer::start().await;
    register(&server, &registration_form("asha", "asha@example.com")).await;

    let resp = register(&server, &registration_form("ravi", "asha@example.com")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains(DUPLICATE));
    assert_eq!(server.users().len(), 1);
    assert!(server.users().find_by_username("ravi").is_none());
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations_create_one_user() {
    let server = TestServer::start().await;

    let attempts = (0..8).map(|i| {
        let form = registration_form("asha", &format!("asha{i}@example.com"));
        let client = server.client().clone();
        let url = server.url("/auth/register");
        async move { client.post(url).form(&form).send().await.unwrap().status() }
    });
    let statuses = run_concurrently(attempts).await;

    let created = statuses
        .iter()
        .filter(|s| **s == StatusCode::SEE_OTHER)
        .count();
    assert_eq!(created, 1);
    assert_eq!(server.users().len(), 1);
}

async fn run_concurrently<F>(futures: impl IntoIterator<Item = F>) -> Vec<StatusCode>
where
    F: std::future::Future<Output = StatusCode> + Send + 'static,
{
    let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
    let mut statuses = Vec::with_capacity(handles.len());
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    statuses
}
