// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit session lifecycle and role-based permissions.
//!
//! Identity is a value handed to whoever needs it, never a global. A session
//! moves through anonymous -> authenticating -> authenticated(user, role) ->
//! signed_out; transitions consume the session and return the next state, so
//! an illegal jump is a typed error instead of a silently inconsistent
//! singleton.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ticket::Ticket;
use crate::user::{Role, User};

/// Authentication state of one client session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    /// No credentials presented yet. Initial state.
    #[default]
    Anonymous,
    /// Credentials submitted, awaiting the identity provider.
    Authenticating,
    /// Signed in with a resolved directory entry and role.
    Authenticated { user: User, role: Role },
    /// Explicitly signed out.
    SignedOut,
}

impl Session {
    /// Returns the state name used in transition errors and display.
    pub fn state_name(&self) -> &'static str {
        match self {
            Session::Anonymous => "anonymous",
            Session::Authenticating => "authenticating",
            Session::Authenticated { .. } => "authenticated",
            Session::SignedOut => "signed_out",
        }
    }

    /// Starts authentication from a signed-out or fresh session.
    pub fn begin_authentication(self) -> Result<Session> {
        match self {
            Session::Anonymous | Session::SignedOut => Ok(Session::Authenticating),
            other => Err(Error::InvalidSessionTransition {
                from: other.state_name(),
                to: "authenticating",
            }),
        }
    }

    /// Completes authentication with the resolved user and role.
    pub fn authenticated(self, user: User, role: Role) -> Result<Session> {
        match self {
            Session::Authenticating => Ok(Session::Authenticated { user, role }),
            other => Err(Error::InvalidSessionTransition {
                from: other.state_name(),
                to: "authenticated",
            }),
        }
    }

    /// Signs an authenticated session out.
    pub fn sign_out(self) -> Result<Session> {
        match self {
            Session::Authenticated { .. } => Ok(Session::SignedOut),
            other => Err(Error::InvalidSessionTransition {
                from: other.state_name(),
                to: "signed_out",
            }),
        }
    }

    /// Returns the signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Returns the signed-in role, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Returns true if the session carries a signed-in identity.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Whether this session may change the given ticket's status.
    ///
    /// Admins and leads always may; agents only on tickets they created or
    /// are assigned to.
    pub fn can_update_status(&self, ticket: &Ticket) -> bool {
        let Session::Authenticated { user, role } = self else {
            return false;
        };
        match role {
            Role::Admin | Role::Lead => true,
            Role::Agent => {
                ticket.assigned_to.as_deref() == Some(user.id.as_str())
                    || ticket.created_by == user.id
            }
        }
    }

    /// Whether this session may manage the user directory.
    pub fn can_manage_users(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Whether this session may view aggregate reports.
    pub fn can_view_reports(&self) -> bool {
        matches!(self.role(), Some(Role::Admin | Role::Lead))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
