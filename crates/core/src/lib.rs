//! Grocify Core - Shared types library.
//!
//! This crate provides the value types used by the Grocify storefront and its
//! integration tests.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no shared state.
//! Every type here validates its input on construction, so a value that exists
//! is a value that passed validation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user IDs, emails, phone numbers and pin codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
