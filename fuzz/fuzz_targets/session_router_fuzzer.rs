//! Fuzz target for the session router
//!
//! # Strategy
//!
//! - Arbitrary interleavings of credential checks, sign-ins, sign-outs and
//!   deep links into guarded trees
//! - Both app profiles
//!
//! # Invariants
//!
//! - Runtime issues exactly the commands the reference model predicts
//! - Every router step passes the standard invariant registry
//! - No tree is mounted while the session is resolving
//! - A mounted tree always sits under its own role root
//! - Final root is the profile-filtered route of the session or the auth flow

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rideway_app::{RouterConfig, RouterEvent};
use rideway_core::{AppProfile, RouteTarget, resolve_route};
use rideway_harness::{ModelCommand, ModelWorld, NavCommand, Operation, RouterProbe, SimWorld};

#[derive(Debug, Arbitrary)]
struct Scenario {
    driver_only: bool,
    ops: Vec<Operation>,
}

fn expected(commands: Vec<ModelCommand>) -> Vec<NavCommand> {
    commands.into_iter().map(ModelCommand::to_nav).collect()
}

fuzz_target!(|scenario: Scenario| {
    if scenario.ops.len() > 256 {
        return;
    }
    let profile =
        if scenario.driver_only { AppProfile::DriverOnly } else { AppProfile::Frontend };

    let Ok(rt) = tokio::runtime::Builder::new_current_thread().build() else {
        return;
    };

    rt.block_on(async {
        let mut model = ModelWorld::new(profile);
        let mut real = SimWorld::new(profile);
        let mut probe = RouterProbe::new(RouterConfig { profile });

        let start = real.start().await.unwrap();
        assert_eq!(start, expected(model.start()));
        probe
            .handle_cascade(RouterEvent::SessionChanged(model.session().to_session()))
            .unwrap();

        for op in scenario.ops {
            let got = real.apply(op).await.unwrap();
            assert_eq!(got, expected(model.apply(op)), "diverged on {op:?}");

            let event = match op {
                Operation::EnterTree { role } => {
                    RouterEvent::TreeEntered { role: role.to_role() }
                },
                _ => RouterEvent::SessionChanged(model.session().to_session()),
            };
            if let Err(violations) = probe.handle_cascade(event) {
                panic!("invariant violations after {op:?}: {violations:?}");
            }
        }

        let router = real.runtime().router();
        assert_eq!(router.mounted(), model.mounted().map(|role| role.to_role()));

        // Guard redirects may leave the auth flow up over a signed-in session
        let routed = profile.admit(resolve_route(router.session()));
        let current = router.current();
        assert!(current == Some(routed) || current == Some(RouteTarget::AuthFlow));
    });
});
