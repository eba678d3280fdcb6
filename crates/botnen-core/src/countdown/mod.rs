//! Countdown records and the fixed date-text format.
//!
//! A countdown is a free-form name plus an absolute local target time.
//! Targets carry no timezone offset and are stored with second precision
//! as `YYYY-MM-DD HH:MM:SS`.

mod remaining;

pub use remaining::format_remaining;

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// strftime pattern for target timestamps.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable form of [`DATE_FORMAT`], used in error messages.
pub const DATE_FORMAT_HINT: &str = "YYYY-MM-DD HH:MM:SS";

/// Parse user or stored date text with the fixed format.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDateFormat`] when the text does not match.
pub fn parse_target(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::InvalidDateFormat {
            input: text.to_string(),
        }
    })
}

/// A named countdown to a local date and time.
///
/// Serialized as `{"name": ..., "date": "YYYY-MM-DD HH:MM:SS"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub name: String,
    #[serde(rename = "date", with = "date_text")]
    pub target: NaiveDateTime,
}

impl Countdown {
    pub fn new(name: impl Into<String>, target: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Build a countdown from raw input text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDateFormat`] if `date_text` does not parse.
    pub fn parse(name: &str, date_text: &str) -> Result<Self> {
        Ok(Self::new(name, parse_target(date_text)?))
    }

    /// Target rendered in the fixed format.
    pub fn date_text(&self) -> String {
        self.target.format(DATE_FORMAT).to_string()
    }

    /// Signed time left until the target. Zero or negative means expired.
    pub fn remaining(&self, now: NaiveDateTime) -> TimeDelta {
        self.target - now
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.remaining(now) <= TimeDelta::zero()
    }
}

/// List-view label: `<name> - <date>`.
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.target.format(DATE_FORMAT))
    }
}

mod date_text {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(target: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&target.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        super::parse_target(&text).map_err(serde::de::Error::custom)
    }
}
