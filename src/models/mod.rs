//! Data models for the address book.
//!
//! This module contains the contact record and the address book that owns
//! every record, keyed by contact name.

pub mod address_book;
pub mod record;

pub use address_book::{AddressBook, NO_NOTES};
pub use record::{FieldUpdate, Record, NO_ADDRESS, NO_EMAIL};
