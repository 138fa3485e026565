//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration and login against the in-memory user store
//! - `orders` - Checkout intake: parse, validate and acknowledge an order

pub mod auth;
pub mod orders;
