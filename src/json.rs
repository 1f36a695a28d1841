//! Typed field extraction from decoded response documents.
//!
//! The decoder parses a response once into a [`serde_json::Value`] tree and
//! pulls the fields it knows about by tag. An absent or `null` field yields
//! the caller's default; a field that is present with the wrong shape is a
//! [`DecodeError`], never a silent default.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::DecodeError;

pub(crate) type JsonObject = Map<String, Value>;

pub(crate) fn read_string(
    obj: &JsonObject,
    tag: &'static str,
) -> Result<Option<String>, DecodeError> {
    match obj.get(tag) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecodeError::InvalidField {
            field: tag,
            expected: "string",
        }),
    }
}

pub(crate) fn read_u64(
    obj: &JsonObject,
    tag: &'static str,
    default: u64,
) -> Result<u64, DecodeError> {
    match obj.get(tag) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_u64().ok_or(DecodeError::InvalidField {
            field: tag,
            expected: "unsigned integer",
        }),
    }
}

pub(crate) fn read_i64(
    obj: &JsonObject,
    tag: &'static str,
    default: i64,
) -> Result<i64, DecodeError> {
    match obj.get(tag) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_i64().ok_or(DecodeError::InvalidField {
            field: tag,
            expected: "integer",
        }),
    }
}

/// Reads a duration carried on the wire as integer nanoseconds.
pub(crate) fn read_duration(
    obj: &JsonObject,
    tag: &'static str,
    default: Duration,
) -> Result<Duration, DecodeError> {
    match obj.get(tag) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => {
            let nanos = value.as_u64().ok_or(DecodeError::InvalidField {
                field: tag,
                expected: "duration in nanoseconds",
            })?;
            Ok(Duration::from_nanos(nanos))
        }
    }
}

/// Reads an RFC 3339 timestamp, normalized to UTC.
pub(crate) fn read_datetime(
    obj: &JsonObject,
    tag: &'static str,
) -> Result<Option<DateTime<Utc>>, DecodeError> {
    match obj.get(tag) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|_| DecodeError::InvalidField {
                field: tag,
                expected: "RFC 3339 timestamp",
            }),
        Some(_) => Err(DecodeError::InvalidField {
            field: tag,
            expected: "RFC 3339 timestamp",
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(obj) => obj,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn absent_fields_yield_defaults() {
        let obj = object(json!({}));
        assert_eq!(read_string(&obj, "name").unwrap(), None);
        assert_eq!(read_u64(&obj, "seq", 7).unwrap(), 7);
        assert_eq!(read_i64(&obj, "max", -1).unwrap(), -1);
        assert_eq!(
            read_duration(&obj, "wait", Duration::from_secs(30)).unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(read_datetime(&obj, "time").unwrap(), None);
    }

    #[test]
    fn null_reads_as_absent() {
        let obj = object(json!({ "name": null, "seq": null }));
        assert_eq!(read_string(&obj, "name").unwrap(), None);
        assert_eq!(read_u64(&obj, "seq", 3).unwrap(), 3);
    }

    #[test]
    fn present_fields_read_typed() {
        let obj = object(json!({
            "name": "workers",
            "seq": 42,
            "max": -5,
            "wait": 10_000_000_000u64,
            "time": "2021-02-03T04:05:06.000000007Z",
        }));
        assert_eq!(read_string(&obj, "name").unwrap().as_deref(), Some("workers"));
        assert_eq!(read_u64(&obj, "seq", 0).unwrap(), 42);
        assert_eq!(read_i64(&obj, "max", 0).unwrap(), -5);
        assert_eq!(
            read_duration(&obj, "wait", Duration::ZERO).unwrap(),
            Duration::from_secs(10)
        );
        let time = read_datetime(&obj, "time").unwrap().unwrap();
        assert_eq!(
            time,
            DateTime::parse_from_rfc3339("2021-02-03T04:05:06.000000007Z").unwrap()
        );
    }

    #[test]
    fn malformed_fields_fail_instead_of_defaulting() {
        let obj = object(json!({
            "name": 12,
            "seq": "not-a-number",
            "negative_seq": -1,
            "wait": "30s",
            "time": "yesterday",
        }));
        assert!(matches!(
            read_string(&obj, "name"),
            Err(DecodeError::InvalidField { field: "name", .. })
        ));
        assert!(read_u64(&obj, "seq", 0).is_err());
        assert!(read_u64(&obj, "negative_seq", 0).is_err());
        assert!(read_duration(&obj, "wait", Duration::ZERO).is_err());
        assert!(read_datetime(&obj, "time").is_err());
    }

    #[test]
    fn datetime_normalizes_offsets_to_utc() {
        let obj = object(json!({ "time": "2021-06-01T12:00:00+02:00" }));
        let time = read_datetime(&obj, "time").unwrap().unwrap();
        assert_eq!(time.to_rfc3339(), "2021-06-01T10:00:00+00:00");
    }
}
