// src/types/dates.rs
//! Publication timestamps as the store reports them.

use super::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a document was first published.
///
/// The store reports RFC 3339 timestamps (`2021-03-25T19:25:28+0000`), but
/// older exports carry bare dates (`2021-03-25`). Both parse; a bare date
/// becomes midnight UTC. The field is nullable upstream — documents saved
/// but never published have no date — so this type always travels as an
/// `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PublishDate(DateTime<Utc>);

impl PublishDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        // Offsets without a colon, as the store emits them
        if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z") {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(midnight.and_utc()));
            }
        }

        Err(ValidationError::InvalidTimestamp(input.to_string()))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn date_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for PublishDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for PublishDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublishDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rfc3339() {
        let date = PublishDate::parse("2021-03-25T19:25:28+00:00").unwrap();
        assert_eq!(date.date_naive().to_string(), "2021-03-25");
    }

    #[test]
    fn parses_offset_without_colon() {
        let date = PublishDate::parse("2021-03-25T19:25:28+0000").unwrap();
        assert_eq!(date.date_naive().to_string(), "2021-03-25");
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let date = PublishDate::parse("2021-03-25").unwrap();
        assert_eq!(date.as_datetime().to_rfc3339(), "2021-03-25T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(PublishDate::parse("not a date").is_err());
        assert!(PublishDate::parse("25/03/2021").is_err());
    }

    #[test]
    fn deserializes_inside_json() {
        let date: PublishDate = serde_json::from_str("\"2021-03-25\"").unwrap();
        assert_eq!(date.date_naive().to_string(), "2021-03-25");
    }
}
