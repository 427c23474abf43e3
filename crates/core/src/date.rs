use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::policy::DatePolicy;

/// Display format for post dates, e.g. "March 5, 2024"
pub const POST_DATE_FORMAT: &str = "%B %-d, %Y";

/// Error type for timestamp formatting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("invalid timestamp '{0}'")]
    Invalid(String),
}

/// Parse an ISO-8601 timestamp into UTC
///
/// Accepts RFC 3339 (what GitHub sends), naive date-times, and bare dates.
/// Naive values are taken as UTC.
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError::Invalid(timestamp.to_string()))
}

/// Format a timestamp as "Month D, YYYY"
pub fn format_post_date(timestamp: &str) -> Result<String, TimestampError> {
    let dt = parse_timestamp(timestamp)?;
    Ok(dt.format(POST_DATE_FORMAT).to_string())
}

/// Format a timestamp, applying the configured policy for malformed input
pub fn render_post_date(timestamp: &str, policy: &DatePolicy) -> Result<String, TimestampError> {
    match (format_post_date(timestamp), policy) {
        (Ok(formatted), _) => Ok(formatted),
        (Err(_), DatePolicy::Placeholder(text)) => Ok(text.clone()),
        (Err(e), DatePolicy::Fail) => Err(e),
    }
}
