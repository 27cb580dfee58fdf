//! Calendar-day helpers. Every date the tracker stores is a `YYYY-MM-DD`
//! string interpreted as a local calendar day, never an instant.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Deserializer, Serializer};

use super::DomainError;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string.
pub fn parse_day(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .map_err(|e| DomainError::InvalidInput(format!("Invalid date '{}': {}", value, e)))
}

/// Parse an optional day, treating a malformed value as absent.
pub fn parse_day_lenient(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?;
    if raw.trim().is_empty() {
        return None;
    }
    match parse_day(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("[date] ignoring malformed date value={} err={}", raw, e);
            None
        }
    }
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDate>` fields that come from the user store.
/// A malformed or empty string deserializes to `None` instead of failing the
/// whole profile.
pub mod lenient_optional_day {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&format_day(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(parse_day_lenient(raw.as_deref()))
    }
}
