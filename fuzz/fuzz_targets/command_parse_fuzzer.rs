//! Fuzz target for the shell command parser
//!
//! # Invariants
//!
//! - Parsing never panics on arbitrary UTF-8
//! - Blank and comment lines parse as empty
//! - Unknown commands report the first word of the line

#![no_main]

use libfuzzer_sys::fuzz_target;
use rideway_cli::{Command, commands};

fuzz_target!(|line: &str| {
    let command = commands::parse(line);

    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        assert_eq!(command, Command::Empty);
    }

    if let Command::Unknown { input } = &command {
        assert_eq!(Some(input.as_str()), trimmed.split_whitespace().next());
    }
});
