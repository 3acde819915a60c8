//! Business dates
//!
//! Claim dates are free text, but two dates are produced by the system
//! itself: the default date offered in the claim form and the "as of" date
//! in the report title. Both are taken from a [`Clock`] so that "today" is
//! evaluated in the business timezone and can be pinned in tests.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to date handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Timezone wrapper for the business location
///
/// Wraps chrono_tz::Tz with serialization as the IANA name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// The current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Kuala_Lumpur)
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

/// Source of "today"
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Wall clock evaluated in a business timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub timezone: Timezone,
}

impl SystemClock {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Day.month.year as typed into the claim form, e.g. `19.10.2026`
pub fn format_form_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Day/month/year as shown in the report title, e.g. `19/10/2026`
pub fn format_title_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
