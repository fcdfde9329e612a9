//! Serde adapter for task due dates.
//!
//! The task-list service stores due dates as RFC 3339 timestamps and discards
//! the time component, so only the calendar date is kept. Plain `YYYY-MM-DD`
//! input is accepted as well.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};

#[allow(clippy::ref_option)]
pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => serializer.serialize_str(&format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| parse(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn parse(value: &str) -> Result<NaiveDate, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("invalid due date '{value}': {e}"))
}
