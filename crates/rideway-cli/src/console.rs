//! Console navigator.
//!
//! Implements the [`Navigator`] trait by writing each navigation command as
//! one transcript line. The writer is generic so tests can capture the
//! transcript in memory.

use std::io::{self, Write};

use rideway_app::Navigator;
use rideway_core::{Role, RouteTarget};
use thiserror::Error;

/// Console navigator errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// I/O error writing the transcript.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Navigator that prints commands to a writer.
#[derive(Debug)]
pub struct ConsoleNavigator<W> {
    out: W,
}

impl<W> ConsoleNavigator<W>
where
    W: Write + Send,
{
    /// Create a navigator writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one transcript line.
    pub fn line(&mut self, text: impl std::fmt::Display) -> Result<(), ConsoleError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the navigator, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> Navigator for ConsoleNavigator<W>
where
    W: Write + Send,
{
    type Error = ConsoleError;

    async fn replace(&mut self, target: RouteTarget) -> Result<(), ConsoleError> {
        self.line(format_args!("replace -> {target}"))
    }

    async fn mount(&mut self, role: Role) -> Result<(), ConsoleError> {
        self.line(format_args!("mount {role} tree"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_one_line_per_command() {
        let mut nav = ConsoleNavigator::new(Vec::new());
        nav.replace(RouteTarget::DriverFlow).await.unwrap();
        nav.mount(Role::Driver).await.unwrap();

        let transcript = String::from_utf8(nav.into_inner()).unwrap();
        assert_eq!(transcript, "replace -> DriverFlow\nmount driver tree\n");
    }
}
