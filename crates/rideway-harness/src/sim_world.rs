//! Real routing stack driven by model operations.
//!
//! `SimWorld` mirrors [`crate::ModelWorld`]'s interface on top of the real
//! [`SessionStore`] and [`Runtime`], so model-based tests and the fuzzer can
//! compare both command streams step by step.

use rideway_app::{RouterConfig, Runtime, SessionStore};
use rideway_core::AppProfile;

use crate::{
    model::{ModelSession, Operation},
    sim_navigator::{NavCommand, SimNavigator, SimNavigatorError},
};

/// Session store, runtime and simulation navigator wired together.
pub struct SimWorld {
    store: SessionStore,
    runtime: Runtime<SimNavigator>,
    navigator: SimNavigator,
}

impl SimWorld {
    /// Create a world whose session is resolving.
    pub fn new(profile: AppProfile) -> Self {
        let mut store = SessionStore::new();
        let navigator = SimNavigator::new();
        let runtime = Runtime::new(navigator.clone(), store.subscribe(), RouterConfig { profile });
        Self { store, runtime, navigator }
    }

    /// Route the initial snapshot, returning the commands issued.
    pub async fn start(&mut self) -> Result<Vec<NavCommand>, SimNavigatorError> {
        self.runtime.pump().await?;
        Ok(self.navigator.take_commands())
    }

    /// Apply an operation, returning the commands issued.
    pub async fn apply(&mut self, op: Operation) -> Result<Vec<NavCommand>, SimNavigatorError> {
        match op {
            Operation::BeginCheck => {
                let resolving = self.store.current().clone().into_resolving();
                self.store.publish(resolving);
                self.runtime.pump().await?;
            },
            Operation::Resolve { identity } => {
                self.store.publish(ModelSession { resolving: false, identity }.to_session());
                self.runtime.pump().await?;
            },
            Operation::EnterTree { role } => self.runtime.enter_tree(role.to_role()).await?,
        }

        tracing::trace!(?op, "applied operation");
        Ok(self.navigator.take_commands())
    }

    /// Session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Runtime under test.
    pub fn runtime(&self) -> &Runtime<SimNavigator> {
        &self.runtime
    }

    /// Shared handle to the navigator log.
    pub fn navigator(&self) -> &SimNavigator {
        &self.navigator
    }
}
