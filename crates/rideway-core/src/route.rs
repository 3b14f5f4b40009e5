//! Route decisions.
//!
//! [`resolve_route`] is the only transition function from a [`Session`] to
//! the navigation root. It is total over the session domain and never looks
//! at the role while a credential check is in flight.
//!
//! ```text
//!  resolving ───────────────────────────> WaitingScreen
//!  resolved ─┬─ no identity ────────────> AuthFlow
//!            ├─ identity, role=vendor ──> VendorFlow
//!            └─ identity, role=driver ──> DriverFlow
//! ```

use std::fmt;

use crate::{Role, Session};

/// The single screen tree designated as visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteTarget {
    /// Waiting indicator while credentials are checked.
    WaitingScreen,
    /// Sign-in / sign-up flow.
    AuthFlow,
    /// Vendor screen tree.
    VendorFlow,
    /// Driver screen tree.
    DriverFlow,
}

impl RouteTarget {
    /// Root flow of a role's screen tree.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Vendor => RouteTarget::VendorFlow,
            Role::Driver => RouteTarget::DriverFlow,
        }
    }

    /// Role whose tree this target is. `None` for the waiting and auth flows.
    pub fn role(self) -> Option<Role> {
        match self {
            RouteTarget::VendorFlow => Some(Role::Vendor),
            RouteTarget::DriverFlow => Some(Role::Driver),
            RouteTarget::WaitingScreen | RouteTarget::AuthFlow => None,
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteTarget::WaitingScreen => "WaitingScreen",
            RouteTarget::AuthFlow => "AuthFlow",
            RouteTarget::VendorFlow => "VendorFlow",
            RouteTarget::DriverFlow => "DriverFlow",
        };
        f.write_str(name)
    }
}

/// Map a session to its navigation root.
pub fn resolve_route(session: &Session) -> RouteTarget {
    if session.is_resolving() {
        return RouteTarget::WaitingScreen;
    }

    match session.role() {
        None => RouteTarget::AuthFlow,
        Some(role) => RouteTarget::for_role(role),
    }
}

/// Which role flows an app build hosts.
///
/// The Driver app only ships the driver tree; the Frontend app ships both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppProfile {
    /// Combined vendor/driver app.
    #[default]
    Frontend,
    /// Driver-only app.
    DriverOnly,
}

impl AppProfile {
    /// Whether this build ships the given role's tree.
    pub fn hosts(self, role: Role) -> bool {
        match self {
            AppProfile::Frontend => true,
            AppProfile::DriverOnly => role == Role::Driver,
        }
    }

    /// Replace a role flow this build does not host with the auth flow.
    pub fn admit(self, target: RouteTarget) -> RouteTarget {
        match target.role() {
            Some(role) if !self.hosts(role) => RouteTarget::AuthFlow,
            _ => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Identity;

    fn signed_in(role: Role) -> Session {
        Session::signed_in(Identity::new(1, "u@rideway.test", "U", role))
    }

    #[test]
    fn resolving_waits_even_with_identity() {
        assert_eq!(resolve_route(&Session::resolving()), RouteTarget::WaitingScreen);
        assert_eq!(
            resolve_route(&signed_in(Role::Vendor).into_resolving()),
            RouteTarget::WaitingScreen
        );
    }

    #[test]
    fn resolved_sessions_route_by_role() {
        assert_eq!(resolve_route(&Session::anonymous()), RouteTarget::AuthFlow);
        assert_eq!(resolve_route(&signed_in(Role::Vendor)), RouteTarget::VendorFlow);
        assert_eq!(resolve_route(&signed_in(Role::Driver)), RouteTarget::DriverFlow);
    }

    #[test]
    fn driver_only_profile_turns_vendors_away() {
        let profile = AppProfile::DriverOnly;
        assert_eq!(profile.admit(RouteTarget::VendorFlow), RouteTarget::AuthFlow);
        assert_eq!(profile.admit(RouteTarget::DriverFlow), RouteTarget::DriverFlow);
        assert_eq!(profile.admit(RouteTarget::WaitingScreen), RouteTarget::WaitingScreen);
    }

    #[test]
    fn frontend_profile_admits_everything() {
        for target in [
            RouteTarget::WaitingScreen,
            RouteTarget::AuthFlow,
            RouteTarget::VendorFlow,
            RouteTarget::DriverFlow,
        ] {
            assert_eq!(AppProfile::Frontend.admit(target), target);
        }
    }
}
