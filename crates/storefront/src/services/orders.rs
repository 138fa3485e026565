//! Order intake.
//!
//! Accepts a checkout submission, validates it and acknowledges it. There is
//! no persistence, inventory or payment step: an accepted order is recorded
//! as a structured log entry and confirmed to the shopper.
//!
//! Rejections never expose the underlying parse error to the shopper; the
//! detail goes to the log and the page shows [`ORDER_ERROR_MESSAGE`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::error::add_breadcrumb;
use crate::models::order::{LineItem, OrderReference, OrderSubmission};

/// Message shown for any rejected order.
pub const ORDER_ERROR_MESSAGE: &str = "Error processing order. Please check all fields.";

/// Checkout form as submitted from the place-order page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    /// JSON array of cart line items.
    pub order_details_json: Option<String>,
    /// Total amount as computed by the browser.
    pub order_total_value: Option<String>,
    /// Shipping name.
    pub name: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
}

/// Why an order submission was rejected.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A required form field was absent or blank.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The cart payload is not a JSON array of line items.
    #[error("invalid cart payload: {0}")]
    InvalidCart(#[from] serde_json::Error),

    /// The cart payload decoded to zero items.
    #[error("cart is empty")]
    EmptyCart,

    /// A line item decoded but is not orderable.
    #[error("line item {index}: {reason}")]
    InvalidLineItem { index: usize, reason: &'static str },

    /// The total is not a non-negative decimal amount.
    #[error("invalid order total: {0:?}")]
    InvalidTotal(String),

    /// The line totals do not fit in a decimal amount.
    #[error("cart subtotal out of range")]
    SubtotalOutOfRange,
}

/// Result of an order submission, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The order was accepted.
    Confirmed {
        reference: OrderReference,
        message: String,
    },
    /// The order was rejected; `message` is safe to show.
    Rejected { message: String },
}

impl OrderOutcome {
    /// Message to display to the shopper.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Confirmed { message, .. } | Self::Rejected { message } => message,
        }
    }

    /// Whether the order was accepted.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, OrderError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(OrderError::MissingField(field))
}

fn validate_item(index: usize, item: &LineItem) -> Result<(), OrderError> {
    if item.label().trim().is_empty() {
        return Err(OrderError::InvalidLineItem {
            index,
            reason: "missing product identifier",
        });
    }
    if item.quantity == 0 {
        return Err(OrderError::InvalidLineItem {
            index,
            reason: "quantity must be positive",
        });
    }
    if item.price.is_sign_negative() {
        return Err(OrderError::InvalidLineItem {
            index,
            reason: "price cannot be negative",
        });
    }
    if item.line_total().is_none() {
        return Err(OrderError::InvalidLineItem {
            index,
            reason: "line total out of range",
        });
    }
    Ok(())
}

/// Parse and validate a checkout form.
///
/// # Errors
///
/// Returns an [`OrderError`] describing the first problem found.
pub fn parse(form: &OrderForm) -> Result<OrderSubmission, OrderError> {
    let cart = required(form.order_details_json.as_deref(), "order_details_json")?;
    let total = required(form.order_total_value.as_deref(), "order_total_value")?;
    let shipping_name = required(form.name.as_deref(), "name")?;
    let shipping_address = required(form.address.as_deref(), "address")?;

    let items: Vec<LineItem> = serde_json::from_str(cart)?;
    if items.is_empty() {
        return Err(OrderError::EmptyCart);
    }
    for (index, item) in items.iter().enumerate() {
        validate_item(index, item)?;
    }

    let claimed_total = total;
    let total = Decimal::from_str(claimed_total)
        .ok()
        .filter(|t| !t.is_sign_negative())
        .ok_or_else(|| OrderError::InvalidTotal(claimed_total.to_owned()))?;

    let order = OrderSubmission {
        items,
        total,
        claimed_total: claimed_total.to_owned(),
        shipping_name: shipping_name.to_owned(),
        shipping_address: shipping_address.to_owned(),
    };
    if order.items_subtotal().is_none() {
        return Err(OrderError::SubtotalOutOfRange);
    }
    Ok(order)
}

/// Accept or reject a checkout form.
///
/// Every submission is handled independently: submitting the same form twice
/// confirms two orders.
#[must_use]
pub fn submit(form: &OrderForm) -> OrderOutcome {
    let order = match parse(form) {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!(error = %e, "Order submission rejected");
            return OrderOutcome::Rejected {
                message: ORDER_ERROR_MESSAGE.to_owned(),
            };
        }
    };

    let reference = OrderReference::new();
    record(reference, &order);

    OrderOutcome::Confirmed {
        reference,
        message: format!(
            "Order Rs. {} Confirmed! Thank you, {}. Your groceries are on the way!",
            order.claimed_total, order.shipping_name
        ),
    }
}

/// Emit the log entry that stands in for order persistence.
fn record(reference: OrderReference, order: &OrderSubmission) {
    let subtotal = order.items_subtotal();

    tracing::info!(
        order_ref = %reference,
        total = %order.total,
        items = order.items.len(),
        items_subtotal = subtotal.map(tracing::field::display),
        shipping_name = %order.shipping_name,
        shipping_address = %order.shipping_address,
        "New order received"
    );

    for item in &order.items {
        tracing::debug!(
            order_ref = %reference,
            product = %item.label(),
            quantity = item.quantity,
            price = %item.price,
            "Order line"
        );
    }

    if subtotal.is_some_and(|subtotal| subtotal != order.total) {
        tracing::warn!(
            order_ref = %reference,
            total = %order.total,
            items_subtotal = subtotal.map(tracing::field::display),
            "Order total does not match line items"
        );
    }

    let reference = reference.to_string();
    add_breadcrumb("order", "Order received", Some(&[("order_ref", reference.as_str())]));
}
