// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timeline reconciliation: merge comments and audit entries into one
//! newest-first narrative.
//!
//! Merge rules:
//! - An audit entry absorbs the first unconsumed comment written by the same
//!   actor within 120 seconds, provided the action is one a user submits a
//!   comment alongside (status change, reassignment, L3 mark/unmark).
//! - Comments not absorbed become standalone items.
//! - Rows with unparseable timestamps are skipped, not fatal: one corrupt row
//!   must not hide the rest of a ticket's history.
//! - Output is stable-sorted by timestamp descending.
//!
//! Reconciliation is pure and idempotent: the same snapshot always yields the
//! same sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ticket::{AuditLogEntry, Comment};
use crate::timestamp;
use crate::user::User;

/// Maximum distance between an audit entry and a comment for the two to be
/// treated as one user action.
pub const MERGE_WINDOW_MS: i64 = 120_000;

/// A typed audit action classified from the store's raw `(action, meta)`
/// attribute bag. Unrecognized actions fall back to [`AuditAction::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditAction {
    /// The ticket's lifecycle status changed.
    StatusChanged {
        old_status: String,
        new_status: String,
    },
    /// The ticket was assigned to someone else, or unassigned.
    Reassigned { new_assignee: Option<String> },
    /// The ticket was escalated to L3 handling.
    MarkedL3,
    /// The L3 escalation was removed.
    UnmarkedL3,
    /// Any action kind this crate does not recognize.
    Other { action: String },
}

impl AuditAction {
    /// Classifies a raw store action and its attribute bag.
    ///
    /// Missing meta fields degrade to empty strings or `None`; a malformed
    /// bag never fails the row.
    pub fn classify(action: &str, meta: Option<&serde_json::Value>) -> Self {
        match action {
            "status_changed" => AuditAction::StatusChanged {
                old_status: meta_str(meta, "old_status"),
                new_status: meta_str(meta, "new_status"),
            },
            "reassigned" => AuditAction::Reassigned {
                new_assignee: meta
                    .and_then(|bag| bag.get("new_assignee"))
                    .and_then(|value| value.as_str())
                    .map(str::to_string),
            },
            "marked_l3" => AuditAction::MarkedL3,
            "unmarked_l3" => AuditAction::UnmarkedL3,
            other => AuditAction::Other {
                action: other.to_string(),
            },
        }
    }

    /// Returns true for actions a user plausibly submits a comment alongside.
    /// Only these are eligible to absorb a nearby comment.
    pub fn merges_with_comment(&self) -> bool {
        !matches!(self, AuditAction::Other { .. })
    }

    /// Renders the human-readable description of this action.
    ///
    /// Assignee ids are resolved against the user directory; an id with no
    /// directory entry renders as "Unknown".
    pub fn message(&self, users: &[User]) -> String {
        match self {
            AuditAction::StatusChanged {
                old_status,
                new_status,
            } => format!("Changed status from \"{old_status}\" to \"{new_status}\""),
            AuditAction::Reassigned {
                new_assignee: Some(assignee_id),
            } => {
                let name = users
                    .iter()
                    .find(|user| user.id == *assignee_id)
                    .map_or("Unknown", |user| user.name.as_str());
                format!("Assigned ticket to {name}")
            }
            AuditAction::Reassigned { new_assignee: None } => "Unassigned ticket".to_string(),
            AuditAction::MarkedL3 => "Marked as L3 escalation".to_string(),
            AuditAction::UnmarkedL3 => "Removed L3 escalation".to_string(),
            AuditAction::Other { action } => format!("Performed action: {action}"),
        }
    }
}

fn meta_str(meta: Option<&serde_json::Value>, key: &str) -> String {
    meta.and_then(|bag| bag.get(key))
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Kind of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// A standalone comment.
    Comment,
    /// An audit entry, possibly with an absorbed comment.
    Audit,
}

/// One entry in a ticket's merged activity narrative. Derived, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    /// Source row id; audit items that absorbed a comment get a `-combined`
    /// suffix so the two source rows stay distinguishable.
    pub id: String,
    /// Whether this item came from a comment or an audit entry.
    pub kind: TimelineKind,
    /// When the underlying action happened.
    pub timestamp: DateTime<Utc>,
    /// Display name of the actor.
    pub user_name: String,
    /// Rendered text body.
    pub body: String,
}

/// Merges a ticket's audit entries and comments into one newest-first
/// sequence.
///
/// Inputs are borrowed snapshots and are never mutated; re-running on the
/// same snapshot yields a structurally identical sequence.
pub fn reconcile(
    audits: &[AuditLogEntry],
    comments: &[Comment],
    users: &[User],
) -> Vec<TimelineItem> {
    let mut items = Vec::with_capacity(audits.len() + comments.len());
    let mut consumed: HashSet<&str> = HashSet::new();

    let timed_comments: Vec<(&Comment, DateTime<Utc>)> = comments
        .iter()
        .filter_map(|comment| match timestamp::parse_utc(&comment.created_at) {
            Ok(instant) => Some((comment, instant)),
            Err(_) => {
                tracing::warn!(
                    comment_id = %comment.id,
                    created_at = %comment.created_at,
                    "skipping comment with invalid timestamp"
                );
                None
            }
        })
        .collect();

    for audit in audits {
        let Ok(audit_at) = timestamp::parse_utc(&audit.timestamp) else {
            tracing::warn!(
                audit_id = %audit.id,
                timestamp = %audit.timestamp,
                "skipping audit entry with invalid timestamp"
            );
            continue;
        };

        let action = AuditAction::classify(&audit.action, audit.meta.as_ref());
        let message = action.message(users);

        let related = if action.merges_with_comment() {
            timed_comments.iter().find(|(comment, comment_at)| {
                !consumed.contains(comment.id.as_str())
                    && (*comment_at - audit_at).abs().num_milliseconds() <= MERGE_WINDOW_MS
                    && comment.comment_by == audit.changed_by
            })
        } else {
            None
        };

        match related {
            Some((comment, _)) => {
                consumed.insert(comment.id.as_str());
                items.push(TimelineItem {
                    id: format!("{}-combined", audit.id),
                    kind: TimelineKind::Audit,
                    timestamp: audit_at,
                    user_name: audit.changer_name.clone(),
                    body: format!("{message} with comment: \"{}\"", comment.body),
                });
            }
            None => items.push(TimelineItem {
                id: audit.id.clone(),
                kind: TimelineKind::Audit,
                timestamp: audit_at,
                user_name: audit.changer_name.clone(),
                body: message,
            }),
        }
    }

    for (comment, comment_at) in &timed_comments {
        if consumed.contains(comment.id.as_str()) {
            continue;
        }
        items.push(TimelineItem {
            id: comment.id.clone(),
            kind: TimelineKind::Comment,
            timestamp: *comment_at,
            user_name: comment.commenter_name.clone(),
            body: comment.body.clone(),
        });
    }

    // Stable sort: equal timestamps keep their relative push order.
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
