//! Tagged field values.
//!
//! `FieldValue` is the one place where a raw string becomes a typed piece of
//! contact data. Each kind has its own rule:
//!
//! | kind     | rule                                  | on bad input              |
//! |----------|---------------------------------------|---------------------------|
//! | Name     | non-empty                             | `EmptyName`               |
//! | Phone    | exactly 10 ASCII digits               | `InvalidPhone`            |
//! | Address  | non-empty                             | `EmptyField(Address)`     |
//! | Email    | `local@domain.tld`                    | `Email(Rejected)`, no error |
//! | Birthday | `DD.MM.YYYY`                          | `InvalidBirthdayFormat`   |
//! | Note     | non-empty                             | `EmptyField(Note)`        |

use super::{Birthday, ContactName, EmailAddress, ParsedEmail, PhoneNumber, ValidationError};
use std::fmt;

/// Discriminant for [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
    Address,
    Email,
    Birthday,
    Note,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::Email => "Email",
            Self::Birthday => "Birthday",
            Self::Note => "Note",
        };
        f.write_str(label)
    }
}

/// A validated piece of contact data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Name(ContactName),
    Phone(PhoneNumber),
    Address(String),
    Email(ParsedEmail),
    Birthday(Birthday),
    Note(String),
}

impl FieldValue {
    /// Build a typed value of `kind` from raw user input.
    ///
    /// An invalid email is not an error: it yields
    /// `FieldValue::Email(ParsedEmail::Rejected(_))` so that a larger
    /// operation can continue without it.
    ///
    /// # Errors
    ///
    /// Returns the matching [`ValidationError`] for an empty name, address or
    /// note, a malformed phone, or a malformed birthday.
    pub fn construct(kind: FieldKind, raw: &str) -> Result<Self, ValidationError> {
        Ok(match kind {
            FieldKind::Name => Self::Name(ContactName::new(raw)?),
            FieldKind::Phone => Self::Phone(PhoneNumber::new(raw)?),
            FieldKind::Address => Self::Address(non_empty(kind, raw)?),
            FieldKind::Email => Self::Email(ParsedEmail::parse(raw)),
            FieldKind::Birthday => Self::Birthday(Birthday::parse(raw)?),
            FieldKind::Note => Self::Note(non_empty(kind, raw)?),
        })
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Name(_) => FieldKind::Name,
            Self::Phone(_) => FieldKind::Phone,
            Self::Address(_) => FieldKind::Address,
            Self::Email(_) => FieldKind::Email,
            Self::Birthday(_) => FieldKind::Birthday,
            Self::Note(_) => FieldKind::Note,
        }
    }

    /// The valid email carried by this value, if it is one.
    pub fn as_email(&self) -> Option<&EmailAddress> {
        match self {
            Self::Email(ParsedEmail::Valid(email)) => Some(email),
            _ => None,
        }
    }
}

fn non_empty(kind: FieldKind, raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyField(kind));
    }
    Ok(raw.to_string())
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", name),
            Self::Phone(phone) => write!(f, "{}", phone),
            Self::Address(text) | Self::Note(text) => f.write_str(text),
            Self::Email(ParsedEmail::Valid(email)) => write!(f, "{}", email),
            Self::Email(ParsedEmail::Rejected(raw)) => f.write_str(raw),
            Self::Birthday(birthday) => write!(f, "{}", birthday),
        }
    }
}
