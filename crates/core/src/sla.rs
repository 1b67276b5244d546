// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SLA clock: deadline classification and countdown rendering.
//!
//! The clock is a pure function of its inputs. It holds no timer; callers
//! that want a live countdown re-invoke [`evaluate`] on their own schedule
//! (the reference UI does so every 60 seconds).
//!
//! Classification rules:
//! - no deadline: `NotSet`
//! - settled ticket: `ResolvedOnTime` / `ResolvedLate` by comparing the
//!   resolution instant (falling back to `now` when absent) to the deadline
//! - open ticket: `Overdue` once `now` reaches the deadline, otherwise
//!   `OnTrack` with a countdown string

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::ticket::Status;
use crate::timestamp;

/// SLA classification of a ticket at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaState {
    /// The ticket has no SLA deadline.
    NotSet,
    /// Open, with time remaining before the deadline.
    OnTrack,
    /// Open and past the deadline.
    Overdue,
    /// Settled at or before the deadline.
    ResolvedOnTime,
    /// Settled after the deadline.
    ResolvedLate,
}

impl SlaState {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlaState::NotSet => "not_set",
            SlaState::OnTrack => "on_track",
            SlaState::Overdue => "overdue",
            SlaState::ResolvedOnTime => "resolved_on_time",
            SlaState::ResolvedLate => "resolved_late",
        }
    }

    /// Returns true if the deadline was or is being missed.
    pub fn is_breached(&self) -> bool {
        matches!(self, SlaState::Overdue | SlaState::ResolvedLate)
    }
}

impl fmt::Display for SlaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one clock evaluation: a classification and, for on-track
/// tickets only, a rendered countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlaReading {
    /// The classification at the evaluated instant.
    pub state: SlaState,
    /// Remaining time, rendered per [`format_countdown`]. Present only for
    /// `OnTrack`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<String>,
}

impl SlaReading {
    fn state_only(state: SlaState) -> Self {
        SlaReading { state, countdown: None }
    }
}

/// Evaluates a ticket's SLA state at `now`.
///
/// `sla_deadline` and `resolved_at` are raw store instants; offset-less
/// values are interpreted as UTC. Unparseable instants surface
/// [`Error::InvalidTimestamp`](crate::error::Error::InvalidTimestamp); the
/// clock never guesses.
pub fn evaluate(
    status: Status,
    sla_deadline: Option<&str>,
    resolved_at: Option<&str>,
    now: DateTime<Utc>,
) -> Result<SlaReading> {
    let Some(raw_deadline) = sla_deadline else {
        return Ok(SlaReading::state_only(SlaState::NotSet));
    };
    let deadline = timestamp::parse_utc(raw_deadline)?;

    if status.is_settled() {
        let effective_resolved = match resolved_at {
            Some(raw) => timestamp::parse_utc(raw)?,
            None => now,
        };
        let state = if effective_resolved <= deadline {
            SlaState::ResolvedOnTime
        } else {
            SlaState::ResolvedLate
        };
        return Ok(SlaReading::state_only(state));
    }

    let remaining = deadline - now;
    if remaining <= Duration::zero() {
        return Ok(SlaReading::state_only(SlaState::Overdue));
    }

    Ok(SlaReading {
        state: SlaState::OnTrack,
        countdown: Some(format_countdown(remaining)),
    })
}

/// Renders a positive remaining duration as its largest two non-zero units
/// among days, hours and minutes: `"{d}d {h}h {m}m"`, `"{h}h {m}m"` or
/// `"{m}m"`. Minutes are floored, so `"0m"` is possible just before breach.
pub fn format_countdown(remaining: Duration) -> String {
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Derives the SLA deadline for a ticket created at `created_at` with the
/// given urgency SLA hours.
pub fn deadline_for(created_at: DateTime<Utc>, sla_hours: i64) -> DateTime<Utc> {
    created_at + Duration::hours(sla_hours)
}

/// Lenient breach check for list views.
///
/// Unlike [`evaluate`], this never fails: an absent or unparseable deadline
/// reports no breach, and a settled ticket without a parseable resolution
/// instant reports no breach (there is nothing to compare).
pub fn is_overdue(
    sla_deadline: Option<&str>,
    status: Status,
    resolved_at: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    let Some(raw_deadline) = sla_deadline else {
        return false;
    };
    let Ok(deadline) = timestamp::parse_utc(raw_deadline) else {
        return false;
    };

    if status.is_settled() {
        return match resolved_at.map(timestamp::parse_utc) {
            Some(Ok(resolved)) => resolved > deadline,
            _ => false,
        };
    }

    deadline < now
}

#[cfg(test)]
#[path = "sla_tests.rs"]
mod tests;
