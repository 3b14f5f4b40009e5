//! Property-based tests for the SessionRouter.
//!
//! Tests verify that the routing invariants hold under arbitrary sequences of
//! session changes and tree entries, for both app profiles.

use proptest::prelude::*;
use rideway_app::{RouterAction, RouterConfig, RouterEvent};
use rideway_core::{AppProfile, Identity, Resolution, Role, RouteTarget, Session};
use rideway_harness::{InvariantKind, InvariantRegistry, RouterProbe, StepSnapshot, StepTrigger};

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Vendor), Just(Role::Driver)]
}

fn session_strategy() -> impl Strategy<Value = Session> {
    (
        prop::option::of((1u64..4, role_strategy())),
        prop_oneof![Just(Resolution::Resolving), Just(Resolution::Resolved)],
    )
        .prop_map(|(identity, resolution)| Session {
            identity: identity.map(|(id, role)| {
                Identity::new(id, format!("user{id}@rideway.test"), "User", role)
            }),
            resolution,
        })
}

/// Generate random router events.
fn event_strategy() -> impl Strategy<Value = RouterEvent> {
    prop_oneof![
        3 => session_strategy().prop_map(RouterEvent::SessionChanged),
        1 => role_strategy().prop_map(|role| RouterEvent::TreeEntered { role }),
    ]
}

fn profile_strategy() -> impl Strategy<Value = AppProfile> {
    prop_oneof![Just(AppProfile::Frontend), Just(AppProfile::DriverOnly)]
}

proptest! {
    #[test]
    fn prop_router_invariants_hold(
        profile in profile_strategy(),
        events in prop::collection::vec(event_strategy(), 0..60),
    ) {
        let mut probe = RouterProbe::new(RouterConfig { profile });

        for event in events {
            let result = probe.handle_cascade(event);
            prop_assert!(result.is_ok(), "violations: {:?}", result.err());
        }
    }

    #[test]
    fn prop_reevaluation_is_idempotent(
        session in session_strategy(),
        profile in profile_strategy(),
    ) {
        let mut probe = RouterProbe::new(RouterConfig { profile });

        let _ = probe.handle(RouterEvent::SessionChanged(session.clone()));
        let root = probe.router().current();

        let again = probe.handle(RouterEvent::SessionChanged(session));
        prop_assert_eq!(again.ok(), Some(vec![]));
        prop_assert_eq!(probe.router().current(), root);
    }

    #[test]
    fn prop_resolving_never_mounts(
        roles in prop::collection::vec(role_strategy(), 1..5),
        identity_role in prop::option::of(role_strategy()),
    ) {
        let mut probe = RouterProbe::new(RouterConfig::default());
        let identity = identity_role.map(|role| Identity::new(1, "u@rideway.test", "U", role));
        let session = Session { identity, resolution: Resolution::Resolving };
        let _ = probe.handle(RouterEvent::SessionChanged(session));

        for role in roles {
            let actions = probe.handle(RouterEvent::TreeEntered { role }).unwrap_or_default();
            prop_assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);
        }
        prop_assert!(probe.router().mounted().is_none());
    }
}

#[test]
fn vendor_login_scenario() {
    let mut probe = RouterProbe::new(RouterConfig::default());

    let actions = probe.handle_cascade(RouterEvent::SessionChanged(Session::resolving())).unwrap();
    assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::WaitingScreen }]);

    let actions = probe.handle_cascade(RouterEvent::SessionChanged(Session::anonymous())).unwrap();
    assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);

    let vendor = Session::signed_in(Identity::new(1, "vera@rideway.test", "Vera", Role::Vendor));
    let actions = probe.handle_cascade(RouterEvent::SessionChanged(vendor)).unwrap();
    assert_eq!(actions, vec![
        RouterAction::Replace { target: RouteTarget::VendorFlow },
        RouterAction::Mount { role: Role::Vendor },
    ]);

    // The driver-only tree handed the vendor session redirects
    let actions = probe.handle_cascade(RouterEvent::TreeEntered { role: Role::Driver }).unwrap();
    assert_eq!(actions, vec![RouterAction::Replace { target: RouteTarget::AuthFlow }]);

    assert_eq!(probe.history().len(), 5);
}

#[test]
fn vendor_link_after_redirect_mounts_under_vendor_root() {
    let mut probe = RouterProbe::new(RouterConfig::default());
    let vendor = Session::signed_in(Identity::new(1, "vera@rideway.test", "Vera", Role::Vendor));
    let _ = probe.handle_cascade(RouterEvent::SessionChanged(vendor)).unwrap();
    let _ = probe.handle_cascade(RouterEvent::TreeEntered { role: Role::Driver }).unwrap();

    let actions = probe.handle_cascade(RouterEvent::TreeEntered { role: Role::Vendor }).unwrap();
    assert_eq!(actions, vec![
        RouterAction::Replace { target: RouteTarget::VendorFlow },
        RouterAction::Mount { role: Role::Vendor },
    ]);
    assert_eq!(probe.router().current(), Some(RouteTarget::VendorFlow));

    // Entering the mounted tree again is a no-op
    let actions = probe.handle_cascade(RouterEvent::TreeEntered { role: Role::Vendor }).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn probe_reports_violations_of_custom_invariants() {
    use rideway_harness::{Invariant, InvariantResult, Violation};

    /// Fails on every mount, to prove violations surface.
    struct NeverMount;

    impl Invariant for NeverMount {
        fn kind(&self) -> InvariantKind {
            InvariantKind::MountRequiresRole
        }

        fn check(&self, step: &StepSnapshot) -> InvariantResult {
            match step.trigger {
                StepTrigger::TreeEntered { .. } if step.mounted.is_some() => {
                    Err(Violation { invariant: self.kind(), message: "mounted".into() })
                },
                _ => Ok(()),
            }
        }
    }

    let mut registry = InvariantRegistry::new();
    registry.add(NeverMount);
    let mut probe = RouterProbe::with_invariants(RouterConfig::default(), registry);

    let driver = Session::signed_in(Identity::new(2, "dan@rideway.test", "Dan", Role::Driver));
    let violations = probe.handle_cascade(RouterEvent::SessionChanged(driver)).unwrap_err();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].invariant, InvariantKind::MountRequiresRole);
}
