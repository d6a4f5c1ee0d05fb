//! Domain validation errors.

use super::field::FieldKind;
use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided contact name is empty.
    EmptyName,

    /// A free-form field (address, note) was given an empty value.
    EmptyField(FieldKind),

    /// The provided phone number is not exactly ten ASCII digits.
    InvalidPhone(String),

    /// The provided email address is invalid.
    ///
    /// Only produced by the strict [`EmailAddress::new`](super::EmailAddress::new)
    /// constructor; field construction reports invalid emails through
    /// [`ParsedEmail::Rejected`](super::ParsedEmail::Rejected) instead.
    InvalidEmail(String),

    /// The provided birthday is not a `DD.MM.YYYY` date.
    InvalidBirthdayFormat(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Contact name cannot be empty"),
            Self::EmptyField(kind) => write!(f, "{} cannot be empty", kind),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidBirthdayFormat(raw) => {
                write!(f, "Invalid birthday format: {}. Use DD.MM.YYYY", raw)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
