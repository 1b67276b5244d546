// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp parsing and IST display formatting.
//!
//! The hosted store emits instants as strings, frequently without an explicit
//! UTC offset. An offset-less instant is always UTC wall time; interpreting
//! it as local time would shift every deadline by the caller's offset.
//!
//! Parsing (`parse_utc`) is strict and shared by every component so the SLA
//! clock and the timeline reconciler cannot disagree on interpretation.
//! Display formatting is lenient: absent input renders "Not set", unparseable
//! input renders "Invalid date".

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Asia::Kolkata;

use crate::error::{Error, Result};

/// Parses a store instant into a UTC timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`, `2024-01-01T05:30:00+05:30`) and
/// offset-less instants (`2024-01-01T00:00:00`, with optional fractional
/// seconds or a space separator), which are interpreted as UTC.
pub fn parse_utc(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidTimestamp(value.to_string()));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    // Offset-less instants are UTC, never local wall-clock time.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::InvalidTimestamp(value.to_string()))
}

/// Formats a store instant in IST using a chrono format string.
///
/// Returns "Not set" for absent input and "Invalid date" for input that
/// fails to parse.
pub fn format_ist(value: Option<&str>, format: &str) -> String {
    let Some(raw) = value else {
        return "Not set".to_string();
    };

    match parse_utc(raw) {
        Ok(instant) => instant.with_timezone(&Kolkata).format(format).to_string(),
        Err(_) => {
            tracing::warn!(value = raw, "invalid date passed to format_ist");
            "Invalid date".to_string()
        }
    }
}

/// Formats an SLA deadline for display.
pub fn format_sla_time(deadline: Option<&str>) -> String {
    format_ist(deadline, "%b %-d, %Y at %-I:%M %p IST")
}

/// Formats a date for ticket listings.
pub fn format_ticket_date(value: Option<&str>) -> String {
    format_ist(value, "%b %d, %Y")
}

/// Formats a date and time for ticket details.
pub fn format_ticket_date_time(value: Option<&str>) -> String {
    format_ist(value, "%b %-d, %Y %-I:%M %p IST")
}

/// Formats a short date and time without a year.
pub fn format_short_date_time(value: Option<&str>) -> String {
    format_ist(value, "%b %d, %H:%M")
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
