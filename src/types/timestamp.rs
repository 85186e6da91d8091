//! Decoding of observation timestamps.
//!
//! The historical weather endpoint is not strict about its timestamp encoding, so
//! RFC 3339 strings, offset-less ISO-8601 strings (taken as UTC) and integer Unix
//! seconds are all accepted.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoUtcDateTime for DateTime<FixedOffset> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Text(String),
}

/// Parses a textual timestamp, returning `None` if no supported format matches.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.into_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(IntoUtcDateTime::into_utc)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Seconds(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| de::Error::custom(format!("timestamp {secs} is out of range"))),
        RawTimestamp::Text(text) => parse_timestamp(&text)
            .ok_or_else(|| de::Error::custom(format!("unrecognised timestamp '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-01-05T02:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 5, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-05T12:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-05 12:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-05T12:30").unwrap(), expected);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
