//! Domain models for the storefront.

pub mod order;
pub mod user;

pub use order::{LineItem, OrderReference, OrderSubmission, ProductRef};
pub use user::{NewUser, User, UserSummary};
