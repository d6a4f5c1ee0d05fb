//! Birthday value object.

use super::errors::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Input and display format for birthdays.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// A contact's date of birth, entered and shown as `DD.MM.YYYY`.
///
/// # Example
///
/// ```
/// use assistant_x::domain::Birthday;
///
/// let birthday = Birthday::parse("01.01.2000").unwrap();
/// assert_eq!(birthday.to_string(), "01.01.2000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parse a `DD.MM.YYYY` date.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBirthdayFormat` if the input is not a
    /// real calendar date in that format.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(raw.trim(), BIRTHDAY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidBirthdayFormat(raw.to_string()))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The anniversary of this birthday in `year`.
    ///
    /// 29 February falls on 28 February in non-leap years.
    pub fn occurrence_in(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .unwrap_or(self.0)
    }

    /// Days from `today` until the next anniversary.
    ///
    /// An anniversary falling on `today` counts as 0, never as next year's.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        let mut next = self.occurrence_in(today.year());
        if next < today {
            next = self.occurrence_in(today.year() + 1);
        }
        (next - today).num_days()
    }
}

impl Serialize for Birthday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Birthday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Birthday::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}
