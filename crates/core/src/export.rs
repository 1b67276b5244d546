// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Export row shaping and CSV rendering for ticket reports.
//!
//! The export is pure: rows are shaped from a snapshot and the CSV comes back
//! as a `String`. Delivering the bytes (download, attachment) is the caller's
//! concern.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::report::ReportFilters;
use crate::ticket::Ticket;
use crate::timestamp;

/// Column headers, in the exported order.
pub const EXPORT_HEADERS: [&str; 14] = [
    "Ticket ID",
    "Title",
    "Description",
    "Status",
    "Priority",
    "SLA Hours",
    "Category",
    "Created By",
    "Assigned To",
    "L3 Escalation",
    "Created Date",
    "SLA Deadline",
    "Resolved Date",
    "Resolution Time (Hours)",
];

/// One display-ready export row. All fields are pre-rendered strings with
/// the report page's fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub ticket_id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub sla_hours: String,
    pub category: String,
    pub created_by: String,
    pub assigned_to: String,
    pub l3_escalation: String,
    pub created_date: String,
    pub sla_deadline: String,
    pub resolved_date: String,
    pub resolution_time_hours: String,
}

impl ExportRow {
    fn fields(&self) -> [&str; 14] {
        [
            &self.ticket_id,
            &self.title,
            &self.description,
            &self.status,
            &self.priority,
            &self.sla_hours,
            &self.category,
            &self.created_by,
            &self.assigned_to,
            &self.l3_escalation,
            &self.created_date,
            &self.sla_deadline,
            &self.resolved_date,
            &self.resolution_time_hours,
        ]
    }
}

/// Shapes a ticket snapshot into export rows.
pub fn export_rows(tickets: &[Ticket]) -> Vec<ExportRow> {
    tickets.iter().map(export_row).collect()
}

fn export_row(ticket: &Ticket) -> ExportRow {
    ExportRow {
        ticket_id: ticket.display_id.clone(),
        title: ticket.title.clone(),
        description: ticket.description.clone().unwrap_or_default(),
        status: ticket.status.as_str().to_uppercase().replace('_', " "),
        priority: ticket
            .urgency_label
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        sla_hours: ticket
            .urgency_sla_hours
            .map_or_else(|| "N/A".to_string(), |hours| hours.to_string()),
        category: ticket
            .category_name
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        created_by: ticket
            .creator_name
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        assigned_to: ticket
            .assignee_name
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string()),
        l3_escalation: if ticket.is_l3 { "Yes" } else { "No" }.to_string(),
        created_date: timestamp::format_ticket_date_time(Some(&ticket.created_at)),
        sla_deadline: timestamp::format_ticket_date_time(ticket.sla_deadline.as_deref()),
        resolved_date: ticket.resolved_at.as_deref().map_or_else(
            || "Not Resolved".to_string(),
            |resolved| timestamp::format_ticket_date_time(Some(resolved)),
        ),
        resolution_time_hours: resolution_hours(ticket),
    }
}

/// Whole hours from creation to resolution, or "N/A" when either instant is
/// absent or unparseable.
fn resolution_hours(ticket: &Ticket) -> String {
    let Some(resolved_raw) = ticket.resolved_at.as_deref() else {
        return "N/A".to_string();
    };
    match (
        timestamp::parse_utc(&ticket.created_at),
        timestamp::parse_utc(resolved_raw),
    ) {
        (Ok(created), Ok(resolved)) => {
            let hours = (resolved - created).num_seconds() as f64 / 3600.0;
            format!("{}", hours.round() as i64)
        }
        _ => "N/A".to_string(),
    }
}

/// Renders export rows as CSV with a header line.
///
/// Fields containing a comma, double quote or newline are wrapped in double
/// quotes with embedded quotes doubled. An empty snapshot is an error, the
/// same as the report page refusing an empty download.
pub fn to_csv(rows: &[ExportRow]) -> Result<String> {
    if rows.is_empty() {
        return Err(Error::EmptyExport);
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        EXPORT_HEADERS
            .iter()
            .map(|header| escape_csv(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.fields()
                .iter()
                .map(|field| escape_csv(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(lines.join("\n"))
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Builds the export file stem: `tickets_export[_{from}_to_{to}]_{today}`.
pub fn export_filename(filters: &ReportFilters, today: NaiveDate) -> String {
    match (filters.from, filters.to) {
        (Some(from), Some(to)) => format!("tickets_export_{from}_to_{to}_{today}"),
        _ => format!("tickets_export_{today}"),
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
