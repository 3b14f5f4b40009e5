//! Navigator trait for abstracting the platform navigation stack.
//!
//! The [`Navigator`] trait decouples the routing runtime from a specific
//! navigation library. Each frontend implements the trait, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use rideway_core::{Role, RouteTarget};

/// Abstracts navigation side-effects for the routing runtime.
///
/// # Implementations
///
/// - **Console**: writes every command as a transcript line
/// - **Simulation**: records commands for invariant checks
pub trait Navigator: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Replace the navigation root with `target`.
    ///
    /// Must not push: the previous root is discarded from the back stack.
    /// Replacing with the current root is a no-op in effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform navigator rejects the command.
    fn replace(&mut self, target: RouteTarget)
    -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Render the children of the guarded tree for `role`.
    ///
    /// Only issued after the tree's guard allowed entry, while `role`'s flow
    /// is the root. Issued at most once per replace.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be rendered.
    fn mount(&mut self, role: Role) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
