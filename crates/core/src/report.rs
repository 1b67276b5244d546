// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate report computations over a ticket snapshot.
//!
//! Every function takes a borrowed snapshot slice and returns fresh derived
//! values; the store's query-side filtering is reproduced here by
//! [`filter_tickets`] since the store itself is an external collaborator.
//!
//! Date-keyed aggregations skip rows with unparseable timestamps (with a
//! warning), the same lenience the timeline reconciler applies: one corrupt
//! row must not empty a whole report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ticket::{Status, Ticket};
use crate::timestamp;

/// Snapshot filters mirroring the report page's query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Inclusive first creation date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive last creation date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Keep tickets this user created or is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Keep tickets in this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Keep tickets with this urgency level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_id: Option<i64>,
}

/// Created/closed ticket counts for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTicketCount {
    pub date: NaiveDate,
    pub created: usize,
    pub closed: usize,
}

/// SLA breach counts for tickets created on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaBreachDay {
    pub date: NaiveDate,
    pub total: usize,
    pub breaches: usize,
    /// Breach share in percent, 0 when the day has no tickets.
    pub percentage: f64,
}

/// Ticket count for one category, with a heatmap intensity scaled to the
/// busiest category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// Percent of the maximum category count.
    pub intensity: f64,
}

/// Per-agent assignment workload broken down by status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentWorkload {
    pub agent_id: String,
    pub agent_name: String,
    pub new: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    pub total: usize,
}

impl AgentWorkload {
    fn empty(agent_id: String, agent_name: String) -> Self {
        AgentWorkload {
            agent_id,
            agent_name,
            new: 0,
            in_progress: 0,
            resolved: 0,
            closed: 0,
            total: 0,
        }
    }
}

/// Ticket count for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Applies report filters to a snapshot.
///
/// The agent filter matches creator or assignee. When a date bound is set,
/// tickets whose `created_at` fails to parse are excluded.
pub fn filter_tickets<'a>(tickets: &'a [Ticket], filters: &ReportFilters) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .filter(|ticket| matches_filters(ticket, filters))
        .collect()
}

fn matches_filters(ticket: &Ticket, filters: &ReportFilters) -> bool {
    if filters.from.is_some() || filters.to.is_some() {
        let Ok(created) = timestamp::parse_utc(&ticket.created_at) else {
            tracing::warn!(
                ticket_id = %ticket.id,
                created_at = %ticket.created_at,
                "excluding ticket with invalid creation timestamp from date-filtered report"
            );
            return false;
        };
        let created_date = created.date_naive();
        if filters.from.is_some_and(|from| created_date < from) {
            return false;
        }
        if filters.to.is_some_and(|to| created_date > to) {
            return false;
        }
    }

    if let Some(agent_id) = &filters.agent_id {
        let matches_agent = ticket.created_by == *agent_id
            || ticket.assigned_to.as_deref() == Some(agent_id.as_str());
        if !matches_agent {
            return false;
        }
    }

    if filters
        .category_id
        .is_some_and(|category_id| ticket.category_id != Some(category_id))
    {
        return false;
    }

    if filters
        .urgency_id
        .is_some_and(|urgency_id| ticket.urgency_id != Some(urgency_id))
    {
        return false;
    }

    true
}

/// Counts tickets created and closed per calendar day, ascending by date.
///
/// A closure is counted on the day the ticket was resolved, for tickets that
/// reached `closed` status.
pub fn daily_ticket_counts(tickets: &[Ticket]) -> Vec<DailyTicketCount> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();

    for ticket in tickets {
        let Ok(created) = timestamp::parse_utc(&ticket.created_at) else {
            warn_skipped(ticket);
            continue;
        };
        days.entry(created.date_naive()).or_default().0 += 1;

        if ticket.status == Status::Closed {
            if let Some(resolved) = ticket
                .resolved_at
                .as_deref()
                .and_then(|raw| timestamp::parse_utc(raw).ok())
            {
                days.entry(resolved.date_naive()).or_default().1 += 1;
            }
        }
    }

    days.into_iter()
        .map(|(date, (created, closed))| DailyTicketCount {
            date,
            created,
            closed,
        })
        .collect()
}

/// Counts SLA breaches per creation day, ascending by date.
///
/// A ticket breaches when it was resolved after its deadline, or is still
/// unresolved with `now` past the deadline. A ticket whose deadline or
/// resolution instant fails to parse is counted in the total but never as a
/// breach.
pub fn daily_sla_breaches(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<SlaBreachDay> {
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();

    for ticket in tickets {
        let Ok(created) = timestamp::parse_utc(&ticket.created_at) else {
            warn_skipped(ticket);
            continue;
        };
        let entry = days.entry(created.date_naive()).or_default();
        entry.0 += 1;

        let breached = match (&ticket.sla_deadline, &ticket.resolved_at) {
            (Some(deadline), Some(resolved)) => {
                match (timestamp::parse_utc(deadline), timestamp::parse_utc(resolved)) {
                    (Ok(deadline), Ok(resolved)) => resolved > deadline,
                    _ => false,
                }
            }
            (Some(deadline), None) => timestamp::parse_utc(deadline)
                .map(|deadline| now > deadline)
                .unwrap_or(false),
            _ => false,
        };
        if breached {
            entry.1 += 1;
        }
    }

    days.into_iter()
        .map(|(date, (total, breaches))| SlaBreachDay {
            date,
            total,
            breaches,
            percentage: if total > 0 {
                breaches as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Counts tickets per category, with heatmap intensity scaled to the busiest
/// category. Tickets without a category land in "Uncategorized".
pub fn category_counts(tickets: &[Ticket]) -> Vec<CategoryCount> {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();

    for ticket in tickets {
        let name = ticket
            .category_name
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        *categories.entry(name).or_default() += 1;
    }

    let max_count = categories.values().copied().max().unwrap_or(0);
    categories
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category,
            count,
            intensity: if max_count > 0 {
                count as f64 / max_count as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Breaks down assignment workload per agent.
///
/// Assigned tickets increment the assignee's status counters; creators are
/// listed even when nothing is assigned to them, so the report covers the
/// whole team.
pub fn agent_workloads(tickets: &[Ticket]) -> Vec<AgentWorkload> {
    let mut agents: BTreeMap<String, AgentWorkload> = BTreeMap::new();

    for ticket in tickets {
        if let Some(creator_name) = &ticket.creator_name {
            agents
                .entry(ticket.created_by.clone())
                .or_insert_with(|| {
                    AgentWorkload::empty(ticket.created_by.clone(), creator_name.clone())
                });
        }

        if let (Some(assignee_id), Some(assignee_name)) =
            (&ticket.assigned_to, &ticket.assignee_name)
        {
            let entry = agents
                .entry(assignee_id.clone())
                .or_insert_with(|| AgentWorkload::empty(assignee_id.clone(), assignee_name.clone()));
            entry.total += 1;
            match ticket.status {
                Status::New => entry.new += 1,
                Status::InProgress => entry.in_progress += 1,
                Status::Resolved => entry.resolved += 1,
                Status::Closed => entry.closed += 1,
            }
        }
    }

    agents.into_values().collect()
}

/// Counts tickets per status over the whole snapshot. Statuses with no
/// tickets are omitted.
pub fn status_counts(tickets: &[Ticket]) -> Vec<StatusCount> {
    count_statuses(tickets.iter())
}

/// Counts tickets per status for tickets created at or after `cutoff`
/// (e.g. the trailing week on the dashboard).
pub fn status_counts_since(tickets: &[Ticket], cutoff: DateTime<Utc>) -> Vec<StatusCount> {
    count_statuses(tickets.iter().filter(|ticket| {
        match timestamp::parse_utc(&ticket.created_at) {
            Ok(created) => created >= cutoff,
            Err(_) => {
                warn_skipped(ticket);
                false
            }
        }
    }))
}

fn count_statuses<'a>(tickets: impl Iterator<Item = &'a Ticket>) -> Vec<StatusCount> {
    const ORDER: [Status; 4] = [
        Status::New,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];

    let mut counts = [0usize; 4];
    for ticket in tickets {
        match ticket.status {
            Status::New => counts[0] += 1,
            Status::InProgress => counts[1] += 1,
            Status::Resolved => counts[2] += 1,
            Status::Closed => counts[3] += 1,
        }
    }

    ORDER
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

fn warn_skipped(ticket: &Ticket) {
    tracing::warn!(
        ticket_id = %ticket.id,
        created_at = %ticket.created_at,
        "skipping ticket with invalid creation timestamp"
    );
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
