//! Standard routing invariants.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use rideway_app::RouterAction;
use rideway_core::{RouteTarget, resolve_route};

use super::{Invariant, InvariantKind, InvariantResult, StepSnapshot, StepTrigger, Violation};

/// The root must follow the session after every session change.
///
/// After a `SessionChanged` step the current root equals the resolved route
/// under the router's profile.
pub struct RouteMatchesSession;

impl Invariant for RouteMatchesSession {
    fn kind(&self) -> InvariantKind {
        InvariantKind::RouteMatchesSession
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if step.trigger != StepTrigger::SessionChanged {
            return Ok(());
        }

        let expected = step.profile.admit(resolve_route(&step.session));
        if step.current != Some(expected) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "session {:?} should route to {expected}, root is {:?}",
                    step.session, step.current
                ),
            });
        }
        Ok(())
    }
}

/// No protected tree renders while a credential check is in flight.
///
/// Covers both the mount state and any `Mount` emitted during the step.
pub struct NoTreeWhileResolving;

impl Invariant for NoTreeWhileResolving {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NoTreeWhileResolving
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if !step.session.is_resolving() {
            return Ok(());
        }

        let mounted_now = step.actions.iter().any(|a| matches!(a, RouterAction::Mount { .. }));
        if step.mounted.is_some() || mounted_now {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("tree {:?} rendered while resolving", step.mounted),
            });
        }
        Ok(())
    }
}

/// A mounted tree belongs to the verified session role.
///
/// If `mounted` is `Some(role)`, the session is resolved, holds `role`, and
/// the app profile ships that tree.
pub struct MountRequiresRole;

impl Invariant for MountRequiresRole {
    fn kind(&self) -> InvariantKind {
        InvariantKind::MountRequiresRole
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        let Some(mounted) = step.mounted else {
            return Ok(());
        };

        let verified = !step.session.is_resolving() && step.session.role() == Some(mounted);
        if !verified || !step.profile.hosts(mounted) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "{mounted} tree mounted for session role {:?} under {:?}",
                    step.session.role(),
                    step.profile
                ),
            });
        }
        Ok(())
    }
}

/// A mounted tree is the tree of the active root.
///
/// If `mounted` is `Some(role)`, the current root is that role's flow.
pub struct MountedUnderOwnRoot;

impl Invariant for MountedUnderOwnRoot {
    fn kind(&self) -> InvariantKind {
        InvariantKind::MountedUnderOwnRoot
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        let Some(mounted) = step.mounted else {
            return Ok(());
        };

        let root = RouteTarget::for_role(mounted);
        if step.current != Some(root) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("{mounted} tree mounted under root {:?}", step.current),
            });
        }
        Ok(())
    }
}

/// Session changes replace the root at most once, and only when it changes.
pub struct ReplaceOnlyOnChange;

impl Invariant for ReplaceOnlyOnChange {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ReplaceOnlyOnChange
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if step.trigger != StepTrigger::SessionChanged {
            return Ok(());
        }

        let replaces = step.replace_count();
        let changed = step.previous != step.current;
        if replaces > 1 || (replaces == 1) != changed {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "{replaces} replace(s) for root {:?} -> {:?}",
                    step.previous, step.current
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rideway_core::{AppProfile, Identity, Role, Session};

    use super::*;

    fn vendor() -> Session {
        Session::signed_in(Identity::new(1, "v@rideway.test", "V", Role::Vendor))
    }

    #[test]
    fn stale_root_is_detected() {
        let step = StepSnapshot::new(StepTrigger::SessionChanged, vendor(), AppProfile::Frontend)
            .with_roots(Some(RouteTarget::AuthFlow), Some(RouteTarget::AuthFlow));

        let err = RouteMatchesSession.check(&step).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::RouteMatchesSession);
    }

    #[test]
    fn mount_while_resolving_is_detected() {
        let step = StepSnapshot::new(
            StepTrigger::TreeEntered { role: Role::Vendor },
            vendor().into_resolving(),
            AppProfile::Frontend,
        )
        .with_mounted(Some(Role::Vendor));

        assert!(NoTreeWhileResolving.check(&step).is_err());
        assert!(MountRequiresRole.check(&step).is_err());
    }

    #[test]
    fn foreign_mount_is_detected() {
        let step = StepSnapshot::new(
            StepTrigger::TreeEntered { role: Role::Driver },
            vendor(),
            AppProfile::Frontend,
        )
        .with_mounted(Some(Role::Driver));

        let err = MountRequiresRole.check(&step).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::MountRequiresRole);
    }

    #[test]
    fn unshipped_mount_is_detected() {
        let step = StepSnapshot::new(
            StepTrigger::TreeEntered { role: Role::Vendor },
            vendor(),
            AppProfile::DriverOnly,
        )
        .with_mounted(Some(Role::Vendor));

        assert!(MountRequiresRole.check(&step).is_err());
    }

    #[test]
    fn mount_under_foreign_root_is_detected() {
        let step = StepSnapshot::new(
            StepTrigger::TreeEntered { role: Role::Vendor },
            vendor(),
            AppProfile::Frontend,
        )
        .with_roots(Some(RouteTarget::AuthFlow), Some(RouteTarget::AuthFlow))
        .with_mounted(Some(Role::Vendor));

        let err = MountedUnderOwnRoot.check(&step).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::MountedUnderOwnRoot);

        let step = step.with_roots(Some(RouteTarget::VendorFlow), Some(RouteTarget::VendorFlow));
        assert!(MountedUnderOwnRoot.check(&step).is_ok());
    }

    #[test]
    fn duplicate_replace_is_detected() {
        let replace = RouterAction::Replace { target: RouteTarget::AuthFlow };
        let step = StepSnapshot::new(
            StepTrigger::SessionChanged,
            Session::anonymous(),
            AppProfile::Frontend,
        )
        .with_roots(Some(RouteTarget::AuthFlow), Some(RouteTarget::AuthFlow))
        .with_actions(vec![replace]);

        let err = ReplaceOnlyOnChange.check(&step).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::ReplaceOnlyOnChange);
    }

    #[test]
    fn guard_redirect_may_repeat_root() {
        let replace = RouterAction::Replace { target: RouteTarget::AuthFlow };
        let step = StepSnapshot::new(
            StepTrigger::TreeEntered { role: Role::Driver },
            Session::anonymous(),
            AppProfile::Frontend,
        )
        .with_roots(Some(RouteTarget::AuthFlow), Some(RouteTarget::AuthFlow))
        .with_actions(vec![replace]);

        assert!(ReplaceOnlyOnChange.check(&step).is_ok());
    }
}
