//! Per-role layout guard.

use rideway_core::{AccessViolation, GuardDecision, Role, Session, check_access, enforce_guard};

/// Guard placed at the entry of a role-specific screen tree.
///
/// Constructed once per tree and handed the current session by reference on
/// every entry; it holds no session state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    required: Role,
}

impl RoleGate {
    /// Guard of the vendor tree.
    pub const VENDOR: RoleGate = RoleGate { required: Role::Vendor };

    /// Guard of the driver tree.
    pub const DRIVER: RoleGate = RoleGate { required: Role::Driver };

    /// Guard for the given role's tree.
    pub fn new(required: Role) -> Self {
        Self { required }
    }

    /// Role this guard requires.
    pub fn required(&self) -> Role {
        self.required
    }

    /// Decide whether the tree may render for `session`.
    pub fn enter(&self, session: &Session) -> GuardDecision {
        enforce_guard(session, self.required)
    }

    /// Like [`RoleGate::enter`], keeping the violation for logging.
    pub fn check(&self, session: &Session) -> Result<(), AccessViolation> {
        check_access(session, self.required)
    }
}
