// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for mantra-core operations.

use thiserror::Error;

/// All possible errors that can occur in mantra-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid timestamp: '{0}'\n  hint: expected an RFC 3339 instant, or an offset-less 'YYYY-MM-DDTHH:MM:SS' instant (interpreted as UTC)")]
    InvalidTimestamp(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: new, in_progress, resolved, closed")]
    InvalidStatus(String),

    #[error("invalid role: '{0}'\n  hint: valid roles are: agent, lead, admin")]
    InvalidRole(String),

    #[error("invalid session transition: cannot go from {from} to {to}")]
    InvalidSessionTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("nothing to export\n  hint: the filtered ticket snapshot is empty")]
    EmptyExport,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for mantra-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
