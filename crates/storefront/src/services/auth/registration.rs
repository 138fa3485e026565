//! Registration form validation.
//!
//! [`validate`] is a pure function: it checks every field of a
//! [`RegistrationForm`] and either returns a [`ValidatedRegistration`] or all
//! of the field errors at once, so the page can annotate every bad field in a
//! single round trip. Uniqueness against the user store is checked afterwards
//! by [`super::AuthService::register`].

use std::fmt;

use secrecy::SecretString;
use serde::Deserialize;

use grocify_core::{Email, PhoneNumber, Pincode};

use super::MIN_PASSWORD_LENGTH;
use crate::models::user::NewUser;

/// Registration form as submitted.
///
/// Missing keys decode as empty strings so that an incomplete submission
/// reaches validation instead of being rejected by the extractor.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub landmark: String,
    pub pincode: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// A registration form field that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Pincode,
}

impl Field {
    /// The form key for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Pincode => "pincode",
        }
    }
}

/// A validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All validation failures for a submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any error is attached to `field`.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// First error message for a form key, for template lookups.
    #[must_use]
    pub fn message_for(&self, key: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|e| e.field.as_str() == key)
            .map(|e| e.message)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field.as_str(), error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A registration that passed field validation.
pub struct ValidatedRegistration {
    pub username: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: PhoneNumber,
    pub address: String,
    pub landmark: Option<String>,
    pub pincode: Pincode,
}

impl ValidatedRegistration {
    /// Combine with the password hash into a storable user.
    #[must_use]
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
            landmark: self.landmark,
            pincode: self.pincode,
        }
    }
}

/// Returns the value if it is not blank, otherwise records `message`.
fn required<'a>(
    value: &'a str,
    field: Field,
    message: &'static str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    if value.trim().is_empty() {
        errors.push(field, message);
        None
    } else {
        Some(value)
    }
}

/// Validate every field of a registration form.
///
/// # Errors
///
/// Returns every [`FieldError`] found, in form order.
pub fn validate(form: &RegistrationForm) -> Result<ValidatedRegistration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let username = required(
        &form.username,
        Field::Username,
        "Username is required.",
        &mut errors,
    );

    let password = required(
        &form.password,
        Field::Password,
        "Password is required.",
        &mut errors,
    )
    .and_then(|password| {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(
                Field::Password,
                "Password must be at least 8 characters long.",
            );
            None
        } else {
            Some(password)
        }
    });

    let first_name = required(
        &form.first_name,
        Field::FirstName,
        "First Name is required.",
        &mut errors,
    );

    let last_name = required(
        &form.last_name,
        Field::LastName,
        "Last Name is required.",
        &mut errors,
    );

    let email = required(&form.email, Field::Email, "Email ID is required.", &mut errors)
        .and_then(|email| {
            Email::parse(email)
                .map_err(|_| {
                    errors.push(
                        Field::Email,
                        "Invalid email format (e.g., user@domain.com).",
                    );
                })
                .ok()
        });

    let phone = required(
        &form.phone,
        Field::Phone,
        "Phone Number is required.",
        &mut errors,
    )
    .and_then(|phone| {
        PhoneNumber::parse(phone)
            .map_err(|_| {
                errors.push(Field::Phone, "Phone number must be exactly 10 digits.");
            })
            .ok()
    });

    let address = required(
        &form.address,
        Field::Address,
        "Address is required.",
        &mut errors,
    );

    let pincode = required(
        &form.pincode,
        Field::Pincode,
        "Pin Code is required.",
        &mut errors,
    )
    .and_then(|pincode| {
        Pincode::parse(pincode)
            .map_err(|_| {
                errors.push(Field::Pincode, "Pin code must be a 6-digit number.");
            })
            .ok()
    });

    let (
        Some(username),
        Some(password),
        Some(first_name),
        Some(last_name),
        Some(email),
        Some(phone),
        Some(address),
        Some(pincode),
    ) = (
        username, password, first_name, last_name, email, phone, address, pincode,
    )
    else {
        return Err(errors);
    };

    let landmark = Some(form.landmark.trim())
        .filter(|landmark| !landmark.is_empty())
        .map(str::to_owned);

    Ok(ValidatedRegistration {
        username: username.to_owned(),
        password: SecretString::from(password.to_owned()),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email,
        phone,
        address: address.to_owned(),
        landmark,
        pincode,
    })
}
