//! Deadline parsing: RFC 3339, or naive local times in an IANA timezone.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::InvalidTaskError;

/// Naive layouts accepted for local deadlines, tried in order.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn parse_timezone(tz: &str) -> Result<Tz, InvalidTaskError> {
    tz.parse()
        .map_err(|_| InvalidTaskError::InvalidTimezone(tz.to_string()))
}

/// Parse a deadline string into UTC.
///
/// Inputs carrying an offset (`2024-01-15T09:00:00+02:00`, `...Z`) are taken as-is.
/// Naive inputs like `2024-01-15T09:00:00` are read in `tz`.
pub fn parse_deadline(name: &str, input: &str, tz: Tz) -> Result<DateTime<Utc>, InvalidTaskError> {
    let invalid = |reason: String| InvalidTaskError::InvalidDeadline {
        name: name.to_string(),
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("deadline is missing".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let ndt = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| invalid("expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]".to_string()))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| invalid(format!("ambiguous or invalid local time (DST?) in {tz}")))?;

    Ok(local_dt.with_timezone(&Utc))
}
