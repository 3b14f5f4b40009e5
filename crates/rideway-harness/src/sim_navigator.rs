//! Simulation navigator implementing the Navigator trait.
//!
//! `SimNavigator` provides the same interface as the console navigator but
//! records commands for deterministic testing. Clones share one log, so a
//! test keeps a handle while the [`rideway_app::Runtime`] owns the other.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rideway_app::Navigator;
use rideway_core::{Role, RouteTarget};

/// Error type for simulation navigator.
#[derive(Debug, Clone)]
pub struct SimNavigatorError(pub String);

impl std::fmt::Display for SimNavigatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimNavigatorError: {}", self.0)
    }
}

impl std::error::Error for SimNavigatorError {}

/// Navigation command observed by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Root replaced.
    Replace(RouteTarget),
    /// Guarded tree rendered.
    Mount(Role),
}

#[derive(Debug, Default)]
struct SharedState {
    commands: Vec<NavCommand>,
    fail_next: bool,
}

/// Simulation navigator for deterministic testing.
#[derive(Debug, Clone, Default)]
pub struct SimNavigator {
    state: Arc<Mutex<SharedState>>,
}

impl SimNavigator {
    /// Create a navigator with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reject the next command with an error.
    pub fn fail_next(&self) {
        self.lock().fail_next = true;
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> Vec<NavCommand> {
        self.lock().commands.clone()
    }

    /// Take all recorded commands, clearing the log.
    pub fn take_commands(&self) -> Vec<NavCommand> {
        std::mem::take(&mut self.lock().commands)
    }

    /// Root of the last replace. `None` if nothing was replaced yet.
    pub fn root(&self) -> Option<RouteTarget> {
        self.lock().commands.iter().rev().find_map(|c| match c {
            NavCommand::Replace(target) => Some(*target),
            NavCommand::Mount(_) => None,
        })
    }

    fn record(&self, command: NavCommand) -> Result<(), SimNavigatorError> {
        let mut state = self.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(SimNavigatorError(format!("rejected {command:?}")));
        }
        state.commands.push(command);
        Ok(())
    }
}

impl Navigator for SimNavigator {
    type Error = SimNavigatorError;

    async fn replace(&mut self, target: RouteTarget) -> Result<(), Self::Error> {
        self.record(NavCommand::Replace(target))
    }

    async fn mount(&mut self, role: Role) -> Result<(), Self::Error> {
        self.record(NavCommand::Mount(role))
    }
}
