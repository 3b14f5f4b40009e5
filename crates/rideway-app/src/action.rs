//! Navigation side-effects.
//!
//! [`RouterAction`] is what the [`crate::SessionRouter`] asks the runtime to
//! do. Both variants are idempotent on the navigator side.

use rideway_core::{Role, RouteTarget};

/// Actions produced by the router state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterAction {
    /// Replace the navigation root. Never a push: the previous flow must not
    /// be reachable through back navigation.
    Replace {
        /// New root.
        target: RouteTarget,
    },

    /// Render the children of a guarded tree whose guard allowed entry.
    Mount {
        /// Role the tree belongs to.
        role: Role,
    },
}
