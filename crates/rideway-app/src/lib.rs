//! Application layer for the rideway clients.
//!
//! Pure state machines plus a generic runtime that wires them to the
//! platform navigator, so the same routing code runs in the console shell
//! and in deterministic simulation.
//!
//! # Components
//!
//! - [`SessionRouter`]: session/guard events in, navigation actions out
//! - [`RoleGate`]: entry check used by each role's screen tree
//! - [`SessionStore`]: explicit session object with change subscriptions
//! - [`AuthProvider`] / [`MemoryAuth`]: the auth collaborator seam
//! - [`Navigator`]: trait for platform-specific navigation
//! - [`Runtime`]: orchestration loop using a Navigator

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod auth;
mod event;
mod gate;
mod navigator;
mod router;
mod runtime;
mod store;

pub use action::RouterAction;
pub use auth::{AuthError, AuthProvider, MIN_PASSWORD_LEN, MemoryAuth, SignupRequest};
pub use event::RouterEvent;
pub use gate::RoleGate;
pub use navigator::Navigator;
pub use router::{RouterConfig, SessionRouter};
pub use runtime::Runtime;
pub use store::{SessionStore, SessionSubscription};
