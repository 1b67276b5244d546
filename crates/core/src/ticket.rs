// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core ticket types for the Mantra helpdesk.
//!
//! This module contains the snapshot row types read from the hosted store
//! (Ticket, Comment, AuditLogEntry) and the domain enums derived from them
//! (Status, Priority). The store owns and mutates these rows; this crate only
//! reads immutable snapshots.
//!
//! Instants cross the boundary as raw strings because the store emits them
//! without an explicit UTC offset. Each component parses them at the point of
//! use with its own failure semantics: the SLA clock is strict, the timeline
//! reconciler and report aggregations skip corrupt rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Just created, not yet picked up.
    New,
    /// Currently being worked on.
    InProgress,
    /// Fixed and awaiting confirmation.
    Resolved,
    /// Confirmed complete or abandoned.
    Closed,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }

    /// Returns true if the ticket reached a settled state (resolved or closed).
    pub fn is_settled(&self) -> bool {
        matches!(self, Status::Resolved | Status::Closed)
    }

    /// Returns true if the ticket is still open (new or in progress).
    pub fn is_open(&self) -> bool {
        !self.is_settled()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Status::New),
            "in_progress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Priority band derived from an urgency level's SLA hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Critical: 4 hours or less to resolve.
    P1,
    /// High: up to a day to resolve.
    P2,
    /// Normal: everything slower.
    P3,
}

impl Priority {
    /// Derives the priority band from SLA hours.
    pub fn from_sla_hours(sla_hours: i64) -> Self {
        if sla_hours <= 4 {
            Priority::P1
        } else if sla_hours <= 24 {
            Priority::P2
        } else {
            Priority::P3
        }
    }

    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An urgency level a ticket is created with. The SLA deadline is derived
/// from `sla_hours` at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyLevel {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display label (e.g. "Critical").
    pub label: String,
    /// Hours allowed until the SLA deadline.
    pub sla_hours: i64,
}

/// A ticket category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A support ticket snapshot as read from the hosted store.
///
/// Joined display fields (`creator_name`, `assignee_name`, `category_name`,
/// `urgency_label`, `urgency_sla_hours`) are denormalized by the store's
/// select and may be absent on partial reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier.
    pub id: String,
    /// Human-facing identifier shown in lists and exports.
    pub display_id: String,
    /// Short description of the problem.
    pub title: String,
    /// Longer description providing context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current lifecycle state.
    pub status: Status,
    /// Whether the ticket is escalated to L3 handling.
    pub is_l3: bool,
    /// User who opened the ticket.
    pub created_by: String,
    /// User currently assigned, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Category reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Urgency level reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_id: Option<i64>,
    /// Joined category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Joined urgency label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_label: Option<String>,
    /// Joined urgency SLA hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_sla_hours: Option<i64>,
    /// Joined creator display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    /// Joined assignee display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    /// When the ticket was created. Offset-less values are UTC.
    pub created_at: String,
    /// When the ticket was resolved, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    /// Instant by which the ticket should be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_deadline: Option<String>,
}

impl Ticket {
    /// Returns the priority band for this ticket, if an urgency is attached.
    pub fn priority(&self) -> Option<Priority> {
        self.urgency_sla_hours.map(Priority::from_sla_hours)
    }
}

/// A free-text comment on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier.
    pub id: String,
    /// The ticket this comment belongs to.
    pub ticket_id: String,
    /// The comment text.
    #[serde(rename = "comment")]
    pub body: String,
    /// User who wrote the comment.
    pub comment_by: String,
    /// Joined commenter display name.
    pub commenter_name: String,
    /// When the comment was submitted. Offset-less values are UTC.
    pub created_at: String,
}

/// An immutable audit record of a state-changing action taken on a ticket.
///
/// `action` and `meta` arrive untyped from the store; classify them into an
/// [`AuditAction`](crate::timeline::AuditAction) before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique identifier.
    pub id: String,
    /// The ticket this entry belongs to.
    pub ticket_id: String,
    /// Raw action kind string.
    pub action: String,
    /// User who performed the action.
    pub changed_by: String,
    /// Joined actor display name.
    pub changer_name: String,
    /// When the action occurred. Offset-less values are UTC.
    pub timestamp: String,
    /// Action-specific attribute bag (e.g. old/new status).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
