//! Order intake types.
//!
//! Orders are acknowledged and logged, never stored. These types only live for
//! the duration of a single submission.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Product identifier as sent by the cart: numeric catalog ID or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(u64),
    Name(String),
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// One line of a submitted cart.
///
/// Accepts both the storefront's own cart shape
/// (`{"id":1,"name":"Fresh Red Apples","price":2.99,"quantity":2}`) and the
/// compact shape (`{"item":"Apple","qty":2,"price":50}`). Unknown keys such as
/// `category` or `image` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<ProductRef>,
    #[serde(default, alias = "item")]
    pub name: Option<String>,
    #[serde(alias = "qty")]
    pub quantity: u32,
    pub price: Decimal,
}

impl LineItem {
    /// Human-readable product label, preferring the name over the ID.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(id)) => id.to_string(),
            _ => String::new(),
        }
    }

    /// `price * quantity`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Reference assigned to an accepted order, used to correlate log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderReference(Uuid);

impl OrderReference {
    /// Generate a fresh reference.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderReference {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A parsed and validated order submission.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub items: Vec<LineItem>,
    /// Total claimed by the client. Not checked against `items`.
    pub total: Decimal,
    /// `total` exactly as submitted, minus surrounding whitespace.
    pub claimed_total: String,
    pub shipping_name: String,
    pub shipping_address: String,
}

impl OrderSubmission {
    /// Sum of the line totals, for operator logging. `None` on overflow.
    #[must_use]
    pub fn items_subtotal(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_compact_shape() {
        let item: LineItem =
            serde_json::from_str(r#"{"item":"Apple","qty":2,"price":50}"#).unwrap();
        assert_eq!(item.label(), "Apple");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.line_total(), Some(Decimal::from(100)));
    }

    #[test]
    fn test_line_item_storefront_shape() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":1,"name":"Fresh Red Apples","price":2.99,"category":"Fruits","quantity":3}"#,
        )
        .unwrap();
        assert_eq!(item.id, Some(ProductRef::Id(1)));
        assert_eq!(item.label(), "Fresh Red Apples");
        assert_eq!(item.line_total(), Some("8.97".parse::<Decimal>().unwrap()));
    }

    #[test]
    fn test_line_item_label_falls_back_to_id() {
        let item: LineItem = serde_json::from_str(r#"{"id":"sku-9","qty":1,"price":"4.50"}"#).unwrap();
        assert_eq!(item.label(), "sku-9");
    }

    #[test]
    fn test_line_item_requires_quantity() {
        let result: Result<LineItem, _> = serde_json::from_str(r#"{"item":"Apple","price":50}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_items_subtotal() {
        let items: Vec<LineItem> = serde_json::from_str(
            r#"[{"item":"Apple","qty":2,"price":50},{"item":"Milk","qty":1,"price":"4.50"}]"#,
        )
        .unwrap();
        let order = OrderSubmission {
            items,
            total: Decimal::from(100),
            claimed_total: "100".to_string(),
            shipping_name: "Asha".to_string(),
            shipping_address: "12 MG Road".to_string(),
        };
        assert_eq!(
            order.items_subtotal(),
            Some("104.50".parse::<Decimal>().unwrap())
        );
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let item: LineItem = serde_json::from_str(
            r#"{"item":"Gold","qty":4000000000,"price":"100000000000000000000"}"#,
        )
        .unwrap();
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_items_subtotal_overflow_is_none() {
        let items: Vec<LineItem> = serde_json::from_str(
            r#"[{"item":"Gold","qty":1,"price":"70000000000000000000000000000"},
                {"item":"Gold","qty":1,"price":"70000000000000000000000000000"}]"#,
        )
        .unwrap();
        assert!(items.iter().all(|item| item.line_total().is_some()));

        let order = OrderSubmission {
            items,
            total: Decimal::ZERO,
            claimed_total: "0".to_string(),
            shipping_name: "Asha".to_string(),
            shipping_address: "12 MG Road".to_string(),
        };
        assert_eq!(order.items_subtotal(), None);
    }
}
