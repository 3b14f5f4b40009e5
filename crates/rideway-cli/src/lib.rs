//! Console shell for the rideway session router.
//!
//! A thin shell over [`rideway_app::Navigator`] that prints navigation
//! commands as a transcript. All routing logic lives in the generic
//! [`rideway_app::Runtime`]; the in-memory [`rideway_app::MemoryAuth`] stands
//! in for the hosted auth backend.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod console;
pub mod shell;

pub use commands::Command;
pub use config::{ParseSeedError, SeedAccount, ShellConfig};
pub use console::{ConsoleError, ConsoleNavigator};
pub use shell::{Shell, ShellError};
