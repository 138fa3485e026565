//! Contact detail types: phone numbers and postal pin codes.
//!
//! Both are fixed-width runs of ASCII digits. Leading zeros are significant,
//! so the values are kept as strings rather than integers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Returns `true` if `s` is exactly `len` ASCII digits.
fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input is not exactly ten digits.
    #[error("phone number must be exactly {len} digits")]
    InvalidFormat {
        /// Required digit count.
        len: usize,
    },
}

/// A ten-digit phone number with no separators or country prefix.
///
/// ```
/// use grocify_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("9876543210").is_ok());
/// assert!(PhoneNumber::parse("98765-43210").is_err());
/// assert!(PhoneNumber::parse("+919876543210").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits in a phone number.
    pub const LENGTH: usize = 10;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::InvalidFormat`] unless the input is exactly
    /// ten ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        if is_digits(s, Self::LENGTH) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneNumberError::InvalidFormat { len: Self::LENGTH })
        }
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// The input is not exactly six digits.
    #[error("pin code must be exactly {len} digits")]
    InvalidFormat {
        /// Required digit count.
        len: usize,
    },
}

/// A six-digit postal pin code.
///
/// ```
/// use grocify_core::Pincode;
///
/// assert!(Pincode::parse("560001").is_ok());
/// assert!(Pincode::parse("5600").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    /// Number of digits in a pin code.
    pub const LENGTH: usize = 6;

    /// Parse a `Pincode` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PincodeError::InvalidFormat`] unless the input is exactly six
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        if is_digits(s, Self::LENGTH) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PincodeError::InvalidFormat { len: Self::LENGTH })
        }
    }

    /// Returns the pin code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Pincode {
    type Error = PincodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pincode> for String {
    fn from(pincode: Pincode) -> Self {
        pincode.0
    }
}
