//! Checkout route handlers.
//!
//! The browser keeps the cart in local storage and hands it to the place-order
//! page. Submitting that page posts the cart back to `/` as form fields.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::rejection::FormRejection,
    response::IntoResponse,
};
use tracing::instrument;

use crate::filters;
use crate::services::orders::{self, ORDER_ERROR_MESSAGE, OrderForm, OrderOutcome};

/// Place-order page template.
#[derive(Template, WebTemplate)]
#[template(path = "placeorder.html")]
pub struct PlaceOrderTemplate {
    /// Confirmation or error message from the last submission.
    pub message: Option<String>,
    /// Tells the page script to clear the stored cart.
    pub confirmed: bool,
}

impl From<OrderOutcome> for PlaceOrderTemplate {
    fn from(outcome: OrderOutcome) -> Self {
        Self {
            message: Some(outcome.message().to_owned()),
            confirmed: outcome.is_confirmed(),
        }
    }
}

/// Display the place-order page.
pub async fn place_order_page() -> impl IntoResponse {
    PlaceOrderTemplate {
        message: None,
        confirmed: false,
    }
}

/// Handle an order submission.
///
/// POST /
///
/// Always renders the place-order page. A body that is not a form at all is
/// treated like any other malformed order.
#[instrument(skip_all)]
pub async fn submit_order(form: Result<Form<OrderForm>, FormRejection>) -> impl IntoResponse {
    match form {
        Ok(Form(form)) => PlaceOrderTemplate::from(orders::submit(&form)),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Order submission rejected: unreadable form");
            PlaceOrderTemplate {
                message: Some(ORDER_ERROR_MESSAGE.to_owned()),
                confirmed: false,
            }
        }
    }
}
