//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::filters;

/// Product card data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: u64,
    pub name: &'static str,
    pub category: &'static str,
    pub price: Decimal,
}

/// The storefront catalog.
///
/// Cart contents live in the browser; the server only ever sees them again as
/// the checkout payload.
#[must_use]
pub fn catalog() -> Vec<ProductView> {
    vec![
        ProductView {
            id: 1,
            name: "Fresh Red Apples",
            category: "Fruits",
            price: Decimal::new(299, 2),
        },
        ProductView {
            id: 2,
            name: "Organic Carrots",
            category: "Vegetables",
            price: Decimal::new(150, 2),
        },
        ProductView {
            id: 3,
            name: "Whole Milk",
            category: "Groceries",
            price: Decimal::new(450, 2),
        },
    ]
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
}

/// Display the home page.
#[instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        products: catalog(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let products = catalog();
        let ids: std::collections::HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_home_renders_catalog() {
        let html = HomeTemplate {
            products: catalog(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Fresh Red Apples"));
        assert!(html.contains("data-price=\"2.99\""));
        assert!(html.contains("Rs. 1.50"));
    }
}
