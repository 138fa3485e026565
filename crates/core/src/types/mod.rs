//! Core types for Grocify.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod email;
pub mod id;

pub use contact::{PhoneNumber, PhoneNumberError, Pincode, PincodeError};
pub use email::{Email, EmailError};
pub use id::UserId;
