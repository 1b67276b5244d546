// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mantra-core: Computation core for the Mantra helpdesk
//!
//! This crate provides the pure, display-ready transformations the Mantra
//! ticketing UI renders: SLA deadline classification with a countdown, the
//! merged comment/audit activity timeline, report aggregations, export rows
//! and the session lifecycle. Persistence, authentication and rendering live
//! in external collaborators; everything here reads an immutable snapshot and
//! returns a fresh value.

pub mod error;
pub mod export;
pub mod report;
pub mod session;
pub mod sla;
pub mod ticket;
pub mod timeline;
pub mod timestamp;
pub mod user;

pub use error::{Error, Result};
pub use export::{ExportRow, EXPORT_HEADERS};
pub use report::{
    AgentWorkload, CategoryCount, DailyTicketCount, ReportFilters, SlaBreachDay, StatusCount,
};
pub use session::Session;
pub use sla::{SlaReading, SlaState};
pub use ticket::{AuditLogEntry, Category, Comment, Priority, Status, Ticket, UrgencyLevel};
pub use timeline::{AuditAction, TimelineItem, TimelineKind};
pub use user::{Role, User};
