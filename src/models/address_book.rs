//! The address book: every contact, keyed by its exact name.

use crate::domain::PhoneNumber;
use crate::error::{BookError, BookResult};
use crate::models::record::{FieldUpdate, Record};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use tracing::{debug, warn};

/// Reply for a contact that exists but has no notes.
pub const NO_NOTES: &str = "No notes found for this contact";

/// In-memory collection of contacts keyed by name.
///
/// Names are case-sensitive and unique; iteration follows insertion order.
/// Not thread-safe: a book is owned by one session and must be wrapped in
/// external synchronization before being shared between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: IndexMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert `record` under its name.
    ///
    /// A record already stored under that name is replaced and returned
    /// (last write wins); its position in iteration order is kept.
    pub fn add(&mut self, record: Record) -> Option<Record> {
        let name = record.name().to_string();
        let previous = self.records.insert(name.clone(), record);
        if previous.is_some() {
            warn!(name = %name, "Replaced existing contact with the same name");
        } else {
            debug!(name = %name, "Contact added");
        }
        previous
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Like [`find_mut`](Self::find_mut) but reports a missing contact as an error.
    pub fn get_mut(&mut self, name: &str) -> BookResult<&mut Record> {
        self.records
            .get_mut(name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))
    }

    /// Remove and return the contact called `name`.
    ///
    /// # Errors
    ///
    /// `BookError::NotFound` if there is no such contact.
    pub fn delete(&mut self, name: &str) -> BookResult<Record> {
        let removed = self
            .records
            .shift_remove(name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))?;
        debug!(name = %name, "Contact deleted");
        Ok(removed)
    }

    /// Replace the contact's first phone, whatever its value.
    ///
    /// Returns `false` (and changes nothing) if the contact is missing or
    /// has no phones.
    pub fn change_primary_phone(&mut self, name: &str, new_phone: PhoneNumber) -> bool {
        let Some(record) = self.records.get_mut(name) else {
            return false;
        };
        let Some(first) = record.phones().first().map(|p| p.as_str().to_string()) else {
            return false;
        };
        let changed = record.edit_phone(&first, new_phone);
        debug!(name = %name, changed, "Primary phone change");
        changed
    }

    /// Set the contact's email. `None` if the contact is missing.
    pub fn change_email(&mut self, name: &str, new_email: &str) -> Option<FieldUpdate> {
        let update = self.records.get_mut(name)?.set_email(new_email);
        debug!(name = %name, applied = update.is_applied(), "Email change");
        Some(update)
    }

    /// Set the contact's address.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing contact, `Validation` for an empty address.
    pub fn change_address(&mut self, name: &str, new_address: &str) -> BookResult<()> {
        self.get_mut(name)?.set_address(new_address)?;
        debug!(name = %name, "Address change");
        Ok(())
    }

    /// Contacts matching `query`, in book order.
    ///
    /// An all-digit query matches any phone containing it; anything else is a
    /// case-insensitive substring match on the name.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let is_phone_query = !query.is_empty() && query.chars().all(|c| c.is_ascii_digit());

        if is_phone_query {
            self.records
                .values()
                .filter(|record| record.phones().iter().any(|p| p.contains(query)))
                .collect()
        } else {
            let query_lower = query.to_lowercase();
            self.records
                .values()
                .filter(|record| record.name().to_lowercase().contains(&query_lower))
                .collect()
        }
    }

    /// Contacts whose next birthday is at most `window_days` after `today`,
    /// paired with the number of days left, in book order.
    ///
    /// The window is measured in calendar days, so it wraps correctly from
    /// December into January.
    pub fn upcoming_birthdays(&self, today: NaiveDate, window_days: u32) -> Vec<(&Record, i64)> {
        self.records
            .values()
            .filter_map(|record| {
                record
                    .days_to_birthday(today)
                    .filter(|&days| days <= i64::from(window_days))
                    .map(|days| (record, days))
            })
            .collect()
    }

    pub fn list_all(&self) -> Vec<&Record> {
        self.records.values().collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Phones of `name` joined by `"; "`.
    pub fn show_phones(&self, name: &str) -> BookResult<String> {
        self.require(name).map(Record::phones_as_text)
    }

    /// Email of `name`, or `"No email"`.
    pub fn show_email(&self, name: &str) -> BookResult<String> {
        self.require(name)
            .map(|record| record.email_or_sentinel().to_string())
    }

    /// Address of `name`, or `"No address"`.
    pub fn show_address(&self, name: &str) -> BookResult<String> {
        self.require(name)
            .map(|record| record.address_or_sentinel().to_string())
    }

    /// Notes of `name` joined by `"; "`, or [`NO_NOTES`].
    pub fn show_notes(&self, name: &str) -> BookResult<String> {
        self.require(name).map(|record| {
            if record.notes().is_empty() {
                NO_NOTES.to_string()
            } else {
                record.notes_as_text()
            }
        })
    }

    fn require(&self, name: &str) -> BookResult<&Record> {
        self.find(name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))
    }
}

// The book is persisted as a plain list of records; names are rebuilt on load.
impl Serialize for AddressBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.records.values())
    }
}

impl<'de> Deserialize<'de> for AddressBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records: Vec<Record> = Vec::deserialize(deserializer)?;
        Ok(records.into_iter().collect())
    }
}

impl FromIterator<Record> for AddressBook {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|record| (record.name().to_string(), record))
            .collect();
        Self { records }
    }
}
