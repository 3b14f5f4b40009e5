//! Model world - the oracle for routing behavior.

use rideway_core::{AppProfile, Resolution, RouteTarget, Session};

use super::operation::{ModelIdentity, ModelRole, Operation};
use crate::NavCommand;

/// Root screen in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTarget {
    /// Waiting indicator.
    Waiting,
    /// Auth flow.
    Auth,
    /// A role's tree.
    Flow(ModelRole),
}

impl ModelTarget {
    /// Real route target.
    pub fn to_target(self) -> RouteTarget {
        match self {
            ModelTarget::Waiting => RouteTarget::WaitingScreen,
            ModelTarget::Auth => RouteTarget::AuthFlow,
            ModelTarget::Flow(role) => RouteTarget::for_role(role.to_role()),
        }
    }
}

/// Navigation command expected from the real runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCommand {
    /// Root replaced.
    Replace(ModelTarget),
    /// Guarded tree rendered.
    Mount(ModelRole),
}

impl ModelCommand {
    /// Command as recorded by the simulation navigator.
    pub fn to_nav(self) -> NavCommand {
        match self {
            ModelCommand::Replace(target) => NavCommand::Replace(target.to_target()),
            ModelCommand::Mount(role) => NavCommand::Mount(role.to_role()),
        }
    }
}

/// Session in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSession {
    /// Credential check in flight.
    pub resolving: bool,
    /// Signed-in identity.
    pub identity: Option<ModelIdentity>,
}

impl ModelSession {
    /// Real session snapshot.
    pub fn to_session(self) -> Session {
        Session {
            identity: self.identity.map(ModelIdentity::to_identity),
            resolution: if self.resolving { Resolution::Resolving } else { Resolution::Resolved },
        }
    }
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    profile: AppProfile,
    session: ModelSession,
    root: Option<ModelTarget>,
    mounted: Option<ModelRole>,
}

impl ModelWorld {
    /// Create a world whose session is resolving and nothing is routed.
    pub fn new(profile: AppProfile) -> Self {
        Self {
            profile,
            session: ModelSession { resolving: true, identity: None },
            root: None,
            mounted: None,
        }
    }

    /// Current model session.
    pub fn session(&self) -> ModelSession {
        self.session
    }

    /// Current root.
    pub fn root(&self) -> Option<ModelTarget> {
        self.root
    }

    /// Mounted guarded tree.
    pub fn mounted(&self) -> Option<ModelRole> {
        self.mounted
    }

    /// Commands for the initial subscription snapshot.
    pub fn start(&mut self) -> Vec<ModelCommand> {
        self.route()
    }

    /// Apply an operation, returning the commands it must produce.
    pub fn apply(&mut self, op: Operation) -> Vec<ModelCommand> {
        let next = match op {
            Operation::BeginCheck => ModelSession { resolving: true, ..self.session },
            Operation::Resolve { identity } => ModelSession { resolving: false, identity },
            Operation::EnterTree { role } => return self.enter(role),
        };

        // The store suppresses identical snapshots
        if next == self.session {
            return Vec::new();
        }
        self.session = next;
        self.route()
    }

    fn route(&mut self) -> Vec<ModelCommand> {
        let target = self.expected_root();
        if self.root == Some(target) {
            return Vec::new();
        }

        self.replace(target)
    }

    /// Replace the root; a role root runs its guard right after.
    fn replace(&mut self, target: ModelTarget) -> Vec<ModelCommand> {
        self.root = Some(target);
        self.mounted = None;

        let mut commands = vec![ModelCommand::Replace(target)];
        if let ModelTarget::Flow(role) = target {
            commands.extend(self.enter(role));
        }
        commands
    }

    fn enter(&mut self, role: ModelRole) -> Vec<ModelCommand> {
        let shipped = role == ModelRole::Driver || self.profile == AppProfile::Frontend;
        let holds = !self.session.resolving && self.session.identity.map(|i| i.role) == Some(role);

        if !(shipped && holds) {
            self.root = Some(ModelTarget::Auth);
            self.mounted = None;
            return vec![ModelCommand::Replace(ModelTarget::Auth)];
        }

        let root = ModelTarget::Flow(role);
        if self.root != Some(root) {
            return self.replace(root);
        }
        if self.mounted == Some(role) {
            return Vec::new();
        }
        self.mounted = Some(role);
        vec![ModelCommand::Mount(role)]
    }

    fn expected_root(&self) -> ModelTarget {
        let session = self.session;
        match (session.resolving, session.identity.map(|i| i.role), self.profile) {
            (true, _, _) => ModelTarget::Waiting,
            (false, None, _) | (false, Some(ModelRole::Vendor), AppProfile::DriverOnly) => {
                ModelTarget::Auth
            },
            (false, Some(role), _) => ModelTarget::Flow(role),
        }
    }
}
