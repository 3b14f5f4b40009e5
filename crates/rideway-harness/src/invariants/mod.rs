//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during routing. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all possible event sequences.
//!
//! # Architecture
//!
//! Every router step is captured as a [`StepSnapshot`] (the event, the
//! session, the root before and after, the emitted actions), then the
//! registered [`Invariant`] checks run against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = StepSnapshot::observe(previous, &event, &router, &actions);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    MountRequiresRole, MountedUnderOwnRoot, NoTreeWhileResolving, ReplaceOnlyOnChange,
    RouteMatchesSession,
};
pub use snapshot::{StepSnapshot, StepTrigger};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// After a session change the root equals the resolved route.
    RouteMatchesSession,
    /// Nothing protected renders while a credential check is in flight.
    NoTreeWhileResolving,
    /// A mounted tree belongs to the verified session role.
    MountRequiresRole,
    /// A mounted tree sits under its own role root.
    MountedUnderOwnRoot,
    /// Session changes replace the root at most once, and only on change.
    ReplaceOnlyOnChange,
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against a router step.
///
/// Invariants capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant identity for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against one step.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, step: &StepSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Use [`InvariantRegistry::standard()`] for the routing invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard routing invariants.
    ///
    /// Includes:
    /// - [`RouteMatchesSession`]: root follows the session
    /// - [`NoTreeWhileResolving`]: no protected content while resolving
    /// - [`MountRequiresRole`]: mounted tree matches the verified role
    /// - [`MountedUnderOwnRoot`]: mounted tree is the active root's tree
    /// - [`ReplaceOnlyOnChange`]: no duplicate replace per session change
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(RouteMatchesSession);
        registry.add(NoTreeWhileResolving);
        registry.add(MountRequiresRole);
        registry.add(MountedUnderOwnRoot);
        registry.add(ReplaceOnlyOnChange);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given step.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, step: &StepSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(step).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
