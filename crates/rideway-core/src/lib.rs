//! Core session model for the rideway clients.
//!
//! Everything here is pure data and pure functions: the [`Session`] snapshot
//! published by the auth collaborator, the [`RouteTarget`] a session maps to,
//! and the guard that protects each role's screen tree.
//!
//! # Components
//!
//! - [`resolve_route`]: the single transition function from session to root
//! - [`enforce_guard`]: entry check for a role-specific screen tree
//! - [`AppProfile`]: which role flows an app build hosts

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod guard;
mod route;
mod session;

pub use error::{AccessViolation, ParseRoleError};
pub use guard::{GuardDecision, check_access, enforce_guard};
pub use route::{AppProfile, RouteTarget, resolve_route};
pub use session::{Identity, Resolution, Role, Session, UserId};
