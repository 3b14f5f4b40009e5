//! Reference model for model-based testing.
//!
//! The model re-derives the routing table from first principles over a tiny
//! state space (two roles, a handful of users). Operations are applied to
//! both the model and the real runtime; their navigation commands must match.

mod operation;
mod world;

pub use operation::{ModelIdentity, ModelRole, Operation};
pub use world::{ModelCommand, ModelSession, ModelTarget, ModelWorld};
