//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the pieces of a contact:
//! names, phone numbers, email addresses and birthdays. These value objects
//! provide validation at construction time and prevent invalid data from
//! being represented in the system. [`FieldValue`] ties them together as one
//! tagged value built from raw user input.

pub mod birthday;
pub mod email;
pub mod errors;
pub mod field;
pub mod name;
pub mod phone;

pub use birthday::Birthday;
pub use email::{EmailAddress, ParsedEmail};
pub use errors::ValidationError;
pub use field::{FieldKind, FieldValue};
pub use name::ContactName;
pub use phone::PhoneNumber;
