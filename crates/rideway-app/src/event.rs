//! Router input events.
//!
//! Events come from the two call sites of the gate:
//! - the app root, notified by the session store on every change
//! - the layout of a role-specific tree, on entry

use rideway_core::{Role, Session};

/// Events processed by the router state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// The auth collaborator published a new session snapshot.
    SessionChanged(Session),

    /// A role-specific tree is about to render its children.
    TreeEntered {
        /// Role the tree requires.
        role: Role,
    },
}
