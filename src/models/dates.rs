//! Calendar date (de)serialization helpers

use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date as sent by the backend listing.
///
/// Accepts plain `YYYY-MM-DD` dates and full RFC 3339 timestamps (the SQL
/// driver serializes `DATE` columns as midnight UTC timestamps).
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

/// `serde_with` adapter for [`NaiveDate`] using [`parse_iso_date`]
pub struct IsoDate;

impl<'de> DeserializeAs<'de, NaiveDate> for IsoDate {
    fn deserialize_as<D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_iso_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }
}

impl SerializeAs<NaiveDate> for IsoDate {
    fn serialize_as<S>(source: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&source.format(DATE_FORMAT))
    }
}
