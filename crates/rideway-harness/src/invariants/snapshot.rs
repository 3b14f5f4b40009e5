//! Observable router steps for invariant checking.
//!
//! A [`StepSnapshot`] captures one `handle` call on the router: what
//! triggered it, the session it saw, and what changed. Invariants operate on
//! snapshots rather than the live router so every check sees one consistent
//! step.

use rideway_app::{RouterAction, RouterEvent, SessionRouter};
use rideway_core::{AppProfile, Role, RouteTarget, Session};

/// What fed the router for this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTrigger {
    /// App-root re-evaluation.
    SessionChanged,
    /// Layout guard of a role tree.
    TreeEntered {
        /// Role the tree requires.
        role: Role,
    },
}

/// Snapshot of one router step.
#[derive(Debug, Clone)]
pub struct StepSnapshot {
    /// Event kind that produced this step.
    pub trigger: StepTrigger,
    /// Session the router held after the step.
    pub session: Session,
    /// Profile the router runs under.
    pub profile: AppProfile,
    /// Root before the step.
    pub previous: Option<RouteTarget>,
    /// Root after the step.
    pub current: Option<RouteTarget>,
    /// Mounted tree after the step.
    pub mounted: Option<Role>,
    /// Actions emitted by the step.
    pub actions: Vec<RouterAction>,
}

impl StepSnapshot {
    /// Create a snapshot with no roots, mount or actions.
    pub fn new(trigger: StepTrigger, session: Session, profile: AppProfile) -> Self {
        Self {
            trigger,
            session,
            profile,
            previous: None,
            current: None,
            mounted: None,
            actions: Vec::new(),
        }
    }

    /// Set the roots before and after the step.
    #[must_use]
    pub fn with_roots(
        mut self,
        previous: Option<RouteTarget>,
        current: Option<RouteTarget>,
    ) -> Self {
        self.previous = previous;
        self.current = current;
        self
    }

    /// Set the mounted tree.
    #[must_use]
    pub fn with_mounted(mut self, mounted: Option<Role>) -> Self {
        self.mounted = mounted;
        self
    }

    /// Set the emitted actions.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<RouterAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Capture a step from a live router right after it handled `event`.
    pub fn observe(
        previous: Option<RouteTarget>,
        event: &RouterEvent,
        router: &SessionRouter,
        actions: &[RouterAction],
    ) -> Self {
        let trigger = match event {
            RouterEvent::SessionChanged(_) => StepTrigger::SessionChanged,
            RouterEvent::TreeEntered { role } => StepTrigger::TreeEntered { role: *role },
        };

        Self {
            trigger,
            session: router.session().clone(),
            profile: router.config().profile,
            previous,
            current: router.current(),
            mounted: router.mounted(),
            actions: actions.to_vec(),
        }
    }

    /// Number of replace actions emitted.
    pub fn replace_count(&self) -> usize {
        self.actions.iter().filter(|a| matches!(a, RouterAction::Replace { .. })).count()
    }
}
