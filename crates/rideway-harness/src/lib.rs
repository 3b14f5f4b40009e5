//! Deterministic simulation harness for rideway session routing.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the routing
//! decision table. Operations are applied to both the model and the real
//! runtime, and the navigation commands they produce are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks over every router step. Use [`InvariantRegistry::standard()`] for
//! the routing invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod probe;
pub mod sim_navigator;
pub mod sim_world;

pub use invariants::{
    Invariant, InvariantKind, InvariantRegistry, InvariantResult, MountRequiresRole,
    MountedUnderOwnRoot, NoTreeWhileResolving, ReplaceOnlyOnChange, RouteMatchesSession,
    StepSnapshot, StepTrigger, Violation,
};
pub use model::{
    ModelCommand, ModelIdentity, ModelRole, ModelSession, ModelTarget, ModelWorld, Operation,
};
pub use probe::RouterProbe;
pub use sim_navigator::{NavCommand, SimNavigator, SimNavigatorError};
pub use sim_world::SimWorld;
