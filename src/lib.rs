//! Assistant X - an interactive command-line address book.
//!
//! Contacts carry validated phones, an optional email, address and birthday,
//! and free-text notes. The book is kept in memory for a session and saved
//! to disk after every change.
//!
//! # Architecture
//!
//! - **domain**: Validated field values (name, phone, email, birthday)
//! - **models**: `Record` (one contact) and `AddressBook` (all contacts)
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **storage**: Loading and saving the whole book
//! - **commands**: Parsing and running one command line
//! - **session**: One interactive session tying the book to its store
//! - **table**: Box-drawn tables for listings and help

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
pub mod table;

// Re-export commonly used types
pub use commands::{Command, Reply};
pub use config::Config;
pub use domain::{
    Birthday, ContactName, EmailAddress, FieldKind, FieldValue, ParsedEmail, PhoneNumber,
    ValidationError,
};
pub use error::{BookError, ConfigError, StorageError};
pub use models::{AddressBook, FieldUpdate, Record};
pub use session::{Session, SessionReply};
pub use storage::{BookStore, FileStore, MemoryStore};
