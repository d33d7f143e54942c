//! Lenient timestamp (de)serialization.
//!
//! The backend emits naive ISO-8601 datetimes (`2025-01-01T14:00:00`) which are
//! UTC, while other deployments emit RFC 3339 with an offset. Both are
//! accepted; serialization always writes RFC 3339.
//!
//! Use with `#[serde(with = "crate::types::timestamp")]`, or
//! `timestamp::option` for nullable fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a backend timestamp.
///
/// # Errors
///
/// Returns the RFC 3339 parse error if no accepted format matches.
pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or(rfc_err),
    }
}

/// Serialize a timestamp as RFC 3339.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

/// Deserialize a timestamp in any accepted format.
///
/// # Errors
///
/// Fails when the value is not a string or matches no accepted format.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Nullable variant.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional timestamp, writing `null` for `None`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails when a present value matches no accepted format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse("2025-04-04T16:40:00+02:00").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse("2025-01-01T14:00:00.123456").unwrap();
        assert_eq!((dt.year(), dt.hour()), (2025, 14));

        let short = parse("2025-01-01T14:00").unwrap();
        assert_eq!(short.minute(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_err());
    }
}
