//! Entry guard for role-specific screen trees.

use crate::{AccessViolation, Role, Session};

/// Outcome of a guard check at a protected tree's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the tree.
    Allow,
    /// Render nothing; replace the root with the auth flow.
    RedirectToAuth,
}

impl GuardDecision {
    /// Whether the tree may render.
    pub fn is_allowed(self) -> bool {
        self == GuardDecision::Allow
    }
}

/// Decide whether `session` may view the tree that requires `required`.
///
/// Allows only a resolved session whose identity holds `required`. A
/// resolving session is redirected even if it still carries an identity.
pub fn enforce_guard(session: &Session, required: Role) -> GuardDecision {
    match check_access(session, required) {
        Ok(()) => GuardDecision::Allow,
        Err(_) => GuardDecision::RedirectToAuth,
    }
}

/// [`enforce_guard`] in `Result` form, carrying the violation.
pub fn check_access(session: &Session, required: Role) -> Result<(), AccessViolation> {
    if session.is_resolving() {
        return Err(AccessViolation { required, found: None });
    }

    match session.role() {
        Some(role) if role == required => Ok(()),
        found => Err(AccessViolation { required, found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Identity;

    #[test]
    fn matching_role_is_allowed() {
        let session = Session::signed_in(Identity::new(3, "d@rideway.test", "D", Role::Driver));
        assert_eq!(enforce_guard(&session, Role::Driver), GuardDecision::Allow);
        assert_eq!(enforce_guard(&session, Role::Vendor), GuardDecision::RedirectToAuth);
    }

    #[test]
    fn resolving_is_never_allowed() {
        let driver = Identity::new(3, "d@rideway.test", "D", Role::Driver);
        let session = Session::signed_in(driver).into_resolving();

        assert_eq!(enforce_guard(&session, Role::Driver), GuardDecision::RedirectToAuth);
        assert_eq!(
            check_access(&session, Role::Driver),
            Err(AccessViolation { required: Role::Driver, found: None })
        );
    }

    #[test]
    fn anonymous_is_redirected() {
        for role in Role::ALL {
            assert!(!enforce_guard(&Session::anonymous(), role).is_allowed());
        }
    }
}
