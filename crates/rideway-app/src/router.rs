//! Session router state machine.
//!
//! This module defines the [`SessionRouter`], which owns the decision of
//! which screen tree is visible. It is a pure state machine: it consumes
//! [`crate::RouterEvent`] inputs and produces [`crate::RouterAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Re-evaluates the root on every session change and issues a replace
//!   only when the target differs from the last one issued.
//! - Runs the entry guard of role trees against the latest session.
//! - Tracks which guarded tree is currently mounted.

use rideway_core::{AppProfile, Role, RouteTarget, Session, resolve_route};

use crate::{RoleGate, RouterAction, RouterEvent};

/// Router configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Role flows this app build hosts.
    pub profile: AppProfile,
}

/// Session router state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct SessionRouter {
    config: RouterConfig,
    /// Latest session snapshot. Resolving until the first change arrives.
    session: Session,
    /// Last root issued. `None` before the first evaluation.
    current: Option<RouteTarget>,
    /// Guarded tree whose children are rendered. `None` if none is mounted.
    mounted: Option<Role>,
}

impl SessionRouter {
    /// Create a router that has not routed anywhere yet.
    pub fn new(config: RouterConfig) -> Self {
        Self { config, session: Session::resolving(), current: None, mounted: None }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: RouterEvent) -> Vec<RouterAction> {
        match event {
            RouterEvent::SessionChanged(session) => {
                self.session = session;
                let target = self.evaluate(&self.session);
                tracing::debug!(%target, "evaluated session");

                if self.current == Some(target) {
                    return vec![];
                }

                tracing::info!(from = ?self.current, to = %target, "replacing navigation root");
                self.replace(target)
            },
            RouterEvent::TreeEntered { role } => {
                if !self.config.profile.hosts(role) {
                    tracing::warn!(%role, "tree not shipped in this app, redirecting to auth flow");
                    return self.replace(RouteTarget::AuthFlow);
                }

                match RoleGate::new(role).check(&self.session) {
                    Ok(()) => self.mount(role),
                    Err(violation) => {
                        tracing::warn!(%violation, "access violation, redirecting to auth flow");
                        self.replace(RouteTarget::AuthFlow)
                    },
                }
            },
        }
    }

    /// Root for `session` under this router's profile.
    pub fn evaluate(&self, session: &Session) -> RouteTarget {
        self.config.profile.admit(resolve_route(session))
    }

    /// Drop the issued root after the navigator rejected a command.
    ///
    /// What is on screen is unknown from here on, so the next session
    /// change replaces unconditionally and the next guard pass remounts.
    pub fn forget_root(&mut self) {
        tracing::debug!(root = ?self.current, "forgetting unconfirmed root");
        self.current = None;
        self.mounted = None;
    }

    /// Guard passed: render the tree under its own root.
    fn mount(&mut self, role: Role) -> Vec<RouterAction> {
        let root = RouteTarget::for_role(role);
        if self.current != Some(root) {
            // The new root's guard mounts the tree once the replace lands
            tracing::info!(from = ?self.current, to = %root, "deep link into another root");
            return self.replace(root);
        }
        if self.mounted == Some(role) {
            return vec![];
        }

        self.mounted = Some(role);
        vec![RouterAction::Mount { role }]
    }

    fn replace(&mut self, target: RouteTarget) -> Vec<RouterAction> {
        self.current = Some(target);
        self.mounted = None;
        vec![RouterAction::Replace { target }]
    }

    /// Last root issued. `None` before the first session arrived.
    pub fn current(&self) -> Option<RouteTarget> {
        self.current
    }

    /// Latest session snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mounted guarded tree. `None` if no tree passed its guard since the
    /// last replace.
    pub fn mounted(&self) -> Option<Role> {
        self.mounted
    }

    /// Router configuration.
    pub fn config(&self) -> RouterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use rideway_core::Identity;

    use super::*;

    fn vendor() -> Session {
        Session::signed_in(Identity::new(1, "vera@rideway.test", "Vera", Role::Vendor))
    }

    fn driver() -> Session {
        Session::signed_in(Identity::new(2, "dan@rideway.test", "Dan", Role::Driver))
    }

    #[test]
    fn first_session_always_replaces() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let actions = router.handle(RouterEvent::SessionChanged(Session::resolving()));

        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::WaitingScreen }]);
        assert_eq!(router.current(), Some(RouteTarget::WaitingScreen));
    }

    #[test]
    fn unchanged_target_issues_nothing() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(Session::anonymous()));
        let actions = router.handle(RouterEvent::SessionChanged(Session::anonymous()));

        assert!(actions.is_empty());
    }

    #[test]
    fn guard_mounts_matching_tree() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(driver()));
        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Driver });

        assert_eq!(actions, vec![RouterAction::Mount { role: Role::Driver }]);
        assert_eq!(router.mounted(), Some(Role::Driver));
    }

    #[test]
    fn guard_does_not_remount_mounted_tree() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(driver()));
        let _ = router.handle(RouterEvent::TreeEntered { role: Role::Driver });

        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Driver });
        assert!(actions.is_empty());
        assert_eq!(router.mounted(), Some(Role::Driver));
    }

    #[test]
    fn allowed_tree_outside_its_root_replaces_first() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(vendor()));
        let _ = router.handle(RouterEvent::TreeEntered { role: Role::Driver });
        assert_eq!(router.current(), Some(RouteTarget::AuthFlow));

        // Vendor link while the auth flow is up: back to the vendor root, no mount yet
        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Vendor });
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::VendorFlow }]);
        assert_eq!(router.current(), Some(RouteTarget::VendorFlow));
        assert_eq!(router.mounted(), None);

        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Vendor });
        assert_eq!(actions, vec![RouterAction::Mount { role: Role::Vendor }]);
    }

    #[test]
    fn forgotten_root_is_replaced_again() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(driver()));
        router.forget_root();
        assert_eq!(router.current(), None);

        let other_driver =
            Session::signed_in(Identity::new(3, "dee@rideway.test", "Dee", Role::Driver));
        let actions = router.handle(RouterEvent::SessionChanged(other_driver));
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::DriverFlow }]);
    }

    #[test]
    fn guard_redirects_foreign_role_unconditionally() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(Session::anonymous()));

        // Already on the auth flow, the redirect is still issued
        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Vendor });
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);
        assert_eq!(router.mounted(), None);
    }

    #[test]
    fn guard_before_any_session_redirects() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Driver });

        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);
    }

    #[test]
    fn replace_unmounts_tree() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(vendor()));
        let _ = router.handle(RouterEvent::TreeEntered { role: Role::Vendor });
        assert_eq!(router.mounted(), Some(Role::Vendor));

        let actions = router.handle(RouterEvent::SessionChanged(Session::anonymous()));
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);
        assert_eq!(router.mounted(), None);
    }

    #[test]
    fn driver_only_profile_routes_vendor_to_auth() {
        let config = RouterConfig { profile: AppProfile::DriverOnly };
        let mut router = SessionRouter::new(config);

        let actions = router.handle(RouterEvent::SessionChanged(vendor()));
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);

        let actions = router.handle(RouterEvent::SessionChanged(driver()));
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::DriverFlow }]);
    }

    #[test]
    fn driver_only_profile_refuses_vendor_tree() {
        let config = RouterConfig { profile: AppProfile::DriverOnly };
        let mut router = SessionRouter::new(config);
        let _ = router.handle(RouterEvent::SessionChanged(vendor()));

        let actions = router.handle(RouterEvent::TreeEntered { role: Role::Vendor });
        assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);
        assert_eq!(router.mounted(), None);
    }

    #[test]
    fn switching_accounts_within_role_keeps_root() {
        let mut router = SessionRouter::new(RouterConfig::default());
        let _ = router.handle(RouterEvent::SessionChanged(vendor()));

        let other_vendor =
            Session::signed_in(Identity::new(5, "val@rideway.test", "Val", Role::Vendor));
        let actions = router.handle(RouterEvent::SessionChanged(other_vendor.clone()));

        assert!(actions.is_empty());
        assert_eq!(router.session(), &other_vendor);
    }
}
