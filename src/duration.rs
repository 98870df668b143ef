//! # Duration Strings
//!
//! Parses and formats the duration strings used for lease and token TTLs.
//!
//! Descriptors accept `"30s"`, `"5m"`, `"1h"`, `"2d"`, compound forms such as
//! `"1h30m"`, bare seconds (`"90"`) and an optional leading `-`. Durations are
//! signed so that negative TTLs survive parsing and are rejected by validation
//! with a precise error instead of a parse failure.

use crate::error::ValidationError;
use chrono::TimeDelta;
use regex::Regex;
use std::sync::LazyLock;

static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<number>\d+)(?P<unit>ms|s|m|h|d)")
        .expect("Failed to compile duration segment regex - this should never happen")
});

fn invalid(value: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidDuration {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse a duration string into a signed `TimeDelta`
pub fn parse_duration(duration_str: &str) -> Result<TimeDelta, ValidationError> {
    let trimmed = duration_str.trim();
    if trimmed.is_empty() {
        return Err(invalid(duration_str, "duration string cannot be empty"));
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let body = body.to_lowercase();

    let millis = if body.chars().all(|c| c.is_ascii_digit()) {
        body.parse::<i64>()
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .ok_or_else(|| invalid(duration_str, "number is out of range"))?
    } else {
        let mut total: i64 = 0;
        let mut consumed = 0;
        for captures in SEGMENT_REGEX.captures_iter(&body) {
            let whole = captures
                .get(0)
                .ok_or_else(|| invalid(duration_str, "malformed segment"))?;
            if whole.start() != consumed {
                return Err(invalid(
                    duration_str,
                    "expected format: <number><unit> (e.g. '30s', '5m', '1h')",
                ));
            }
            consumed = whole.end();

            let number: i64 = captures["number"]
                .parse()
                .map_err(|e| invalid(duration_str, format!("invalid number: {e}")))?;
            let unit_millis = match &captures["unit"] {
                "ms" => 1,
                "s" => 1000,
                "m" => 60_000,
                "h" => 3_600_000,
                "d" => 86_400_000,
                unit => return Err(invalid(duration_str, format!("unknown unit '{unit}'"))),
            };
            total = number
                .checked_mul(unit_millis)
                .and_then(|segment| total.checked_add(segment))
                .ok_or_else(|| invalid(duration_str, "duration is out of range"))?;
        }
        if consumed != body.len() {
            return Err(invalid(
                duration_str,
                "expected format: <number><unit> (e.g. '30s', '5m', '1h')",
            ));
        }
        total
    };

    let millis = if negative { -millis } else { millis };
    TimeDelta::try_milliseconds(millis).ok_or_else(|| invalid(duration_str, "duration is out of range"))
}

/// Format a duration as whole seconds, the form the Vault API accepts for TTLs
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    format!("{}s", duration.num_seconds())
}

/// Serde adapter for `TimeDelta` fields written as duration strings
///
/// Deserialization also accepts a plain integer number of seconds.
pub mod serde_duration {
    use super::{format_duration, parse_duration};
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Text(String),
        Seconds(i64),
    }

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        match RawDuration::deserialize(deserializer)? {
            RawDuration::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
            RawDuration::Seconds(secs) => TimeDelta::try_seconds(secs)
                .ok_or_else(|| serde::de::Error::custom(format!("duration {secs}s is out of range"))),
        }
    }
}
