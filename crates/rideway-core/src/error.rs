//! Error types for the session model.

use thiserror::Error;

use crate::Role;

/// A role name that is neither `vendor` nor `driver`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role '{input}' (expected vendor or driver)")]
pub struct ParseRoleError {
    /// Rejected input.
    pub input: String,
}

/// A session attempted to view a screen tree it may not see.
///
/// Never shown to the user: the guarded tree redirects to the auth flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{required} tree requires a {required} session, found {}", describe(.found))]
pub struct AccessViolation {
    /// Role the tree requires.
    pub required: Role,
    /// Role of the session, `None` if signed out or still resolving.
    pub found: Option<Role>,
}

fn describe(found: &Option<Role>) -> &'static str {
    match found {
        Some(role) => role.as_str(),
        None => "no verified identity",
    }
}
