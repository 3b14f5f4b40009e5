//! Invariant-checking wrapper around [`SessionRouter`].

use rideway_app::{RouterAction, RouterConfig, RouterEvent, SessionRouter};

use crate::invariants::{InvariantRegistry, StepSnapshot, Violation};

/// Router that snapshots and checks every step it handles.
pub struct RouterProbe {
    router: SessionRouter,
    invariants: InvariantRegistry,
    history: Vec<StepSnapshot>,
}

impl RouterProbe {
    /// Probe a fresh router with the standard invariants.
    pub fn new(config: RouterConfig) -> Self {
        Self::with_invariants(config, InvariantRegistry::standard())
    }

    /// Probe a fresh router with a custom registry.
    pub fn with_invariants(config: RouterConfig, invariants: InvariantRegistry) -> Self {
        Self { router: SessionRouter::new(config), invariants, history: Vec::new() }
    }

    /// Handle an event, then check the resulting step.
    ///
    /// The step is recorded in the history even when it violates an invariant.
    pub fn handle(&mut self, event: RouterEvent) -> Result<Vec<RouterAction>, Vec<Violation>> {
        let previous = self.router.current();
        let actions = self.router.handle(event.clone());
        let step = StepSnapshot::observe(previous, &event, &self.router, &actions);

        let result = self.invariants.check_all(&step);
        self.history.push(step);
        result.map(|()| actions)
    }

    /// Handle an event and follow every role replace with that tree's guard,
    /// as the runtime does.
    pub fn handle_cascade(
        &mut self,
        event: RouterEvent,
    ) -> Result<Vec<RouterAction>, Vec<Violation>> {
        let mut all = Vec::new();
        let mut pending = vec![event];

        while let Some(event) = pending.pop() {
            for action in self.handle(event)? {
                if let RouterAction::Replace { target } = action
                    && let Some(role) = target.role()
                {
                    pending.push(RouterEvent::TreeEntered { role });
                }
                all.push(action);
            }
        }
        Ok(all)
    }

    /// The wrapped router.
    pub fn router(&self) -> &SessionRouter {
        &self.router
    }

    /// Every step handled so far.
    pub fn history(&self) -> &[StepSnapshot] {
        &self.history
    }
}
