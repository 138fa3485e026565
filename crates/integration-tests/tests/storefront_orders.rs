//! Integration tests for checkout submission and the public pages.

#![allow(clippy::unwrap_used)]

use grocify_integration_tests::TestServer;
use reqwest::StatusCode;

const ORDER_ERROR: &str = "Error processing order. Please check all fields.";
const APPLE_CART: &str = r#"[{"item":"Apple","qty":2,"price":50}]"#;

async fn submit(server: &TestServer, form: &[(&str, &str)]) -> (StatusCode, String) {
    let resp = server
        .client()
        .post(server.url("/"))
        .form(form)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.text().await.unwrap())
}

fn apple_order() -> [(&'static str, &'static str); 4] {
    [
        ("order_details_json", APPLE_CART),
        ("order_total_value", "100"),
        ("name", "Asha"),
        ("address", "12 MG Road"),
    ]
}

#[tokio::test]
async fn test_well_formed_order_confirmed() {
    let server = TestServer::start().await;

    let (status, body) = submit(&server, &apple_order()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        body.contains("Order Rs. 100 Confirmed! Thank you, Asha. Your groceries are on the way!")
    );
    assert!(body.contains("data-confirmed=\"true\""));
}

#[tokio::test]
async fn test_browser_cart_shape_confirmed() {
    let server = TestServer::start().await;
    let cart = r#"[{"id":1,"name":"Fresh Red Apples","price":2.99,"category":"Fruits","quantity":2}]"#;

    let (status, body) = submit(
        &server,
        &[
            ("order_details_json", cart),
            ("order_total_value", "5.98"),
            ("name", "Ravi"),
            ("address", "4 Park Lane"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Order Rs. 5.98 Confirmed! Thank you, Ravi."));
}

#[tokio::test]
async fn test_malformed_cart_gets_generic_error() {
    let server = TestServer::start().await;

    let (status, body) = submit(
        &server,
        &[
            ("order_details_json", r#"[{"item":"Apple","qty":"#),
            ("order_total_value", "100"),
            ("name", "Asha"),
            ("address", "12 MG Road"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(ORDER_ERROR));
    assert!(body.contains("data-confirmed=\"false\""));
    // Parser details stay in the logs
    assert!(!body.contains("EOF"));
    assert!(!body.contains("line 1"));
    assert!(server.users().is_empty());
}

#[tokio::test]
async fn test_missing_fields_get_generic_error() {
    let server = TestServer::start().await;

    let (_, no_name) = submit(
        &server,
        &[
            ("order_details_json", APPLE_CART),
            ("order_total_value", "100"),
            ("address", "12 MG Road"),
        ],
    )
    .await;
    let (_, empty) = submit(&server, &[]).await;
    let (_, bad_total) = submit(
        &server,
        &[
            ("order_details_json", APPLE_CART),
            ("order_total_value", "one hundred"),
            ("name", "Asha"),
            ("address", "12 MG Road"),
        ],
    )
    .await;

    for body in [no_name, empty, bad_total] {
        assert!(body.contains(ORDER_ERROR));
        assert!(!body.contains("Confirmed!"));
    }
}

#[tokio::test]
async fn test_oversized_amounts_get_generic_error() {
    let server = TestServer::start().await;

    for cart in [
        r#"[{"item":"Gold","qty":4000000000,"price":"100000000000000000000"}]"#,
        r#"[{"item":"Gold","qty":1,"price":"70000000000000000000000000000"},
            {"item":"Gold","qty":1,"price":"70000000000000000000000000000"}]"#,
    ] {
        let (status, body) = submit(
            &server,
            &[
                ("order_details_json", cart),
                ("order_total_value", "1"),
                ("name", "Asha"),
                ("address", "12 MG Road"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(ORDER_ERROR));
        assert!(body.contains("data-confirmed=\"false\""));
    }

    // The server is still serving after both submissions
    let (_, body) = submit(&server, &apple_order()).await;
    assert!(body.contains("Order Rs. 100 Confirmed!"));
}

#[tokio::test]
async fn test_non_form_body_gets_generic_error() {
    let server = TestServer::start().await;

    let resp = server
        .client()
        .post(server.url("/"))
        .header("content-type", "application/json")
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains(ORDER_ERROR));
}

#[tokio::test]
async fn test_resubmitted_order_confirms_twice() {
    let server = TestServer::start().await;

    let (first_status, first) = submit(&server, &apple_order()).await;
    let (second_status, second) = submit(&server, &apple_order()).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert!(first.contains("Order Rs. 100 Confirmed!"));
    assert!(second.contains("Order Rs. 100 Confirmed!"));
}

#[tokio::test]
async fn test_shipping_name_is_escaped() {
    let server = TestServer::start().await;

    let (_, body) = submit(
        &server,
        &[
            ("order_details_json", APPLE_CART),
            ("order_total_value", "100"),
            ("name", "<b>Asha</b>"),
            ("address", "12 MG Road"),
        ],
    )
    .await;

    assert!(!body.contains("<b>Asha</b>"));
    assert!(body.contains("Confirmed!"));
}

#[tokio::test]
async fn test_pages_and_assets() {
    let server = TestServer::start().await;
    let client = server.client();

    let home = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    let home = home.text().await.unwrap();
    assert!(home.contains("Fresh Red Apples"));
    assert!(home.contains("Whole Milk"));

    let place_order = client.get(server.url("/placeorder")).send().await.unwrap();
    assert_eq!(place_order.status(), StatusCode::OK);
    let place_order = place_order.text().await.unwrap();
    assert!(place_order.contains("name=\"order_details_json\""));
    assert!(place_order.contains("data-confirmed=\"false\""));

    let css = client
        .get(server.url("/static/css/main.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(css.status(), StatusCode::OK);

    let missing = client.get(server.url("/no-such-page")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let server = TestServer::start().await;
    let client = server.client();

    let health = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert!(health.headers().contains_key("x-request-id"));
    assert_eq!(health.text().await.unwrap(), "ok");

    let ready = client
        .get(server.url("/health/ready"))
        .header("x-request-id", "probe-42")
        .send()
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(ready.headers().get("x-request-id").unwrap(), "probe-42");
}
