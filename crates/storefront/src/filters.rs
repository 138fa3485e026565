//! Custom Askama template filters.

use std::fmt::Display;

/// Formats an amount as rupees with two decimal places.
///
/// Usage in templates: `{{ product.price|rupees }}` renders `Rs. 2.99`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn rupees(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("Rs. {amount:.2}"))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    #[test]
    fn test_decimal_precision_is_forwarded() {
        assert_eq!(format!("Rs. {:.2}", Decimal::new(15, 1)), "Rs. 1.50");
        assert_eq!(format!("Rs. {:.2}", Decimal::new(100, 0)), "Rs. 100.00");
    }
}
