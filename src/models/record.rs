//! Record model representing one contact in the address book.

use crate::domain::{
    Birthday, ContactName, EmailAddress, FieldKind, FieldValue, ParsedEmail, PhoneNumber,
    ValidationError,
};
use crate::error::{BookError, BookResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a missing email.
pub const NO_EMAIL: &str = "No email";

/// Shown in place of a missing address.
pub const NO_ADDRESS: &str = "No address";

/// Outcome of a field update that may softly reject its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// The value was stored.
    Applied,

    /// The email was malformed; any previous email is untouched.
    EmailRejected(String),
}

impl FieldUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// One contact: a fixed name plus phones, optional details and notes.
///
/// The name is the address book key and never changes after creation.
/// Phones keep insertion order and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: ContactName,

    #[serde(default)]
    phones: Vec<PhoneNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<Birthday>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<EmailAddress>,

    #[serde(default)]
    notes: Vec<String>,
}

impl Record {
    /// Create a contact with no phones, details or notes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for an empty name.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: ContactName::new(name)?,
            phones: Vec::new(),
            birthday: None,
            address: None,
            email: None,
            notes: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<Birthday> {
        self.birthday
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Validate and append a phone. Duplicates are kept.
    pub fn add_phone(&mut self, phone: &str) -> Result<(), ValidationError> {
        self.phones.push(PhoneNumber::new(phone)?);
        Ok(())
    }

    /// Remove every phone equal to `phone`. Absent phones are ignored.
    pub fn remove_phone(&mut self, phone: &str) {
        self.phones.retain(|p| p.as_str() != phone);
    }

    /// Replace the first phone equal to `old` with `new`.
    ///
    /// `new` is validated by the caller when it builds the [`PhoneNumber`].
    /// Returns `false` when `old` is not one of this contact's phones.
    pub fn edit_phone(&mut self, old: &str, new: PhoneNumber) -> bool {
        match self.phones.iter_mut().find(|p| p.as_str() == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    pub fn find_phone(&self, phone: &str) -> Option<&PhoneNumber> {
        self.phones.iter().find(|p| p.as_str() == phone)
    }

    /// Set or replace the address.
    pub fn set_address(&mut self, address: &str) -> Result<(), ValidationError> {
        if address.trim().is_empty() {
            return Err(ValidationError::EmptyField(FieldKind::Address));
        }
        self.address = Some(address.to_string());
        Ok(())
    }

    /// Set the email if `email` is well formed.
    ///
    /// A malformed email is reported as [`FieldUpdate::EmailRejected`] and
    /// leaves any existing email in place.
    pub fn set_email(&mut self, email: &str) -> FieldUpdate {
        self.store_email(ParsedEmail::parse(email))
    }

    fn store_email(&mut self, parsed: ParsedEmail) -> FieldUpdate {
        match parsed {
            ParsedEmail::Valid(email) => {
                self.email = Some(email);
                FieldUpdate::Applied
            }
            ParsedEmail::Rejected(raw) => FieldUpdate::EmailRejected(raw),
        }
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    /// Days until the next birthday, counting from `today`.
    ///
    /// `None` when no birthday is set; 0 when the birthday is `today`.
    pub fn days_to_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.birthday.map(|b| b.days_until(today))
    }

    pub fn add_note(&mut self, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField(FieldKind::Note));
        }
        self.notes.push(text.to_string());
        Ok(())
    }

    /// Replace the note at `index`.
    ///
    /// # Errors
    ///
    /// `BookError::InvalidNoteIndex` unless `0 <= index < notes.len()`;
    /// notes are left unchanged.
    pub fn edit_note(&mut self, index: i64, text: &str) -> BookResult<()> {
        let slot = self.note_slot(index)?;
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField(FieldKind::Note).into());
        }
        self.notes[slot] = text.to_string();
        Ok(())
    }

    /// Delete and return the note at `index`.
    ///
    /// # Errors
    ///
    /// `BookError::InvalidNoteIndex` unless `0 <= index < notes.len()`.
    pub fn remove_note(&mut self, index: i64) -> BookResult<String> {
        let slot = self.note_slot(index)?;
        Ok(self.notes.remove(slot))
    }

    fn note_slot(&self, index: i64) -> BookResult<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.notes.len())
            .ok_or(BookError::InvalidNoteIndex {
                index,
                len: self.notes.len(),
            })
    }

    /// Notes joined by `"; "`, empty when there are none.
    pub fn notes_as_text(&self) -> String {
        self.notes.join("; ")
    }

    /// Phones joined by `"; "`, empty when there are none.
    pub fn phones_as_text(&self) -> String {
        self.phones
            .iter()
            .map(PhoneNumber::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn email_or_sentinel(&self) -> &str {
        self.email.as_ref().map_or(NO_EMAIL, EmailAddress::as_str)
    }

    pub fn address_or_sentinel(&self) -> &str {
        self.address.as_deref().unwrap_or(NO_ADDRESS)
    }

    /// Store a pre-validated field.
    ///
    /// Phones and notes are appended; address, birthday and email replace the
    /// current value. A rejected email is reported, not stored.
    ///
    /// # Errors
    ///
    /// `BookError::ImmutableName` for a name: renaming would break the book key.
    pub fn apply(&mut self, field: FieldValue) -> BookResult<FieldUpdate> {
        match field {
            FieldValue::Name(_) => return Err(BookError::ImmutableName),
            FieldValue::Phone(phone) => self.phones.push(phone),
            FieldValue::Address(address) => self.address = Some(address),
            FieldValue::Email(parsed) => return Ok(self.store_email(parsed)),
            FieldValue::Birthday(birthday) => self.birthday = Some(birthday),
            FieldValue::Note(note) => self.notes.push(note),
        }
        Ok(FieldUpdate::Applied)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contact name: {}, phones: {}",
            self.name,
            self.phones_as_text()
        )?;
        if let Some(birthday) = &self.birthday {
            write!(f, ", birthday: {}", birthday)?;
        }
        if let Some(address) = &self.address {
            write!(f, ", address: {}", address)?;
        }
        if let Some(email) = &self.email {
            write!(f, ", email: {}", email)?;
        }
        Ok(())
    }
}
