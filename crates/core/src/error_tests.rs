// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    invalid_timestamp = { Error::InvalidTimestamp("not-a-date".into()), "not-a-date" },
    invalid_status = { Error::InvalidStatus("pending".into()), "pending" },
    invalid_role = { Error::InvalidRole("superuser".into()), "superuser" },
    empty_export = { Error::EmptyExport, "export" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_invalid_session_transition_display() {
    let err = Error::InvalidSessionTransition {
        from: "anonymous",
        to: "signed_out",
    };
    let msg = err.to_string();
    assert!(msg.contains("anonymous"));
    assert!(msg.contains("signed_out"));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
