//! Scripted console shell.
//!
//! Reads one command per line, runs it against [`MemoryAuth`], then pumps
//! the routing [`Runtime`] so every navigation command the change caused is
//! printed before the next line is read.

use std::io::{self, Write};

use rideway_app::{AuthError, AuthProvider, MemoryAuth, RouterConfig, Runtime};
use rideway_core::Role;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{Command, ConsoleError, ConsoleNavigator, ShellConfig, commands};

/// Shell errors.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Writing the transcript failed.
    #[error("console error: {0}")]
    Console(#[from] ConsoleError),

    /// A seed account could not be registered.
    #[error("seed account rejected: {0}")]
    Seed(#[from] AuthError),

    /// Reading commands failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Console shell over the in-memory auth provider.
pub struct Shell<W>
where
    W: Write + Send,
{
    auth: MemoryAuth,
    runtime: Runtime<ConsoleNavigator<W>>,
}

impl<W> Shell<W>
where
    W: Write + Send,
{
    /// Create a shell writing its transcript to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Seed`] if a seed account or the remembered
    /// email is rejected.
    pub fn new(config: ShellConfig, out: W) -> Result<Self, ShellError> {
        let mut auth = MemoryAuth::new();
        for seed in &config.accounts {
            auth.add_account(seed.to_request())?;
        }
        if let Some(email) = &config.remember {
            auth.remember(email)?;
        }

        let sessions = auth.subscribe();
        let runtime = Runtime::new(
            ConsoleNavigator::new(out),
            sessions,
            RouterConfig { profile: config.profile },
        );

        tracing::debug!(
            profile = ?config.profile,
            accounts = auth.account_count(),
            "shell initialized"
        );
        Ok(Self { auth, runtime })
    }

    /// Route the initial session and restore persisted credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript cannot be written.
    pub async fn start(&mut self) -> Result<(), ShellError> {
        self.runtime.pump().await?;
        let restored = self.auth.restore().await;
        self.settle(restored).await
    }

    /// Execute one line. Returns `false` once the shell should stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcript cannot be written.
    pub async fn execute(&mut self, line: &str) -> Result<bool, ShellError> {
        let command = commands::parse(line);
        if command == Command::Empty {
            return Ok(true);
        }
        self.out().line(format_args!("> {}", line.trim()))?;

        match command {
            Command::Empty => {},
            Command::Restore => {
                let result = self.auth.restore().await;
                self.settle(result).await?;
            },
            Command::Login { email, password } => {
                let result = self.auth.login(&email, &password).await.map(drop);
                self.settle(result).await?;
            },
            Command::Signup(request) => {
                let result = self.auth.signup(request).await.map(drop);
                self.settle(result).await?;
            },
            Command::Logout => {
                let result = self.auth.logout().await;
                self.settle(result).await?;
            },
            Command::Open { role } => self.open(role).await?,
            Command::WhoAmI => self.whoami()?,
            Command::Quit => return Ok(false),
            Command::Unknown { input } => {
                self.out().line(format_args!("? unknown command: {input}"))?;
            },
            Command::InvalidArgs { command, error } => {
                self.out().line(format_args!("! {command}: {error}"))?;
            },
        }
        Ok(true)
    }

    /// Run `start`, then every line of `reader` until EOF or `quit`.
    ///
    /// Returns the transcript writer.
    ///
    /// # Errors
    ///
    /// Returns an error if reading commands or writing the transcript fails.
    pub async fn run<R>(mut self, reader: R) -> Result<W, ShellError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.start().await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if !self.execute(&line).await? {
                break;
            }
        }

        Ok(self.runtime.into_navigator().into_inner())
    }

    /// The auth provider backing the shell.
    pub fn auth(&self) -> &MemoryAuth {
        &self.auth
    }

    /// The routing runtime.
    pub fn runtime(&self) -> &Runtime<ConsoleNavigator<W>> {
        &self.runtime
    }

    /// Print the navigation the last auth operation caused, then its error.
    async fn settle(&mut self, result: Result<(), AuthError>) -> Result<(), ShellError> {
        self.runtime.pump().await?;
        if let Err(e) = result {
            self.out().line(format_args!("! {e}"))?;
        }
        Ok(())
    }

    async fn open(&mut self, role: Role) -> Result<(), ShellError> {
        // Changes already published must be routed before the deep link
        self.runtime.pump().await?;
        self.runtime.enter_tree(role).await?;
        Ok(())
    }

    fn whoami(&mut self) -> Result<(), ShellError> {
        let session = self.auth.session();
        let text = if session.is_resolving() {
            "resolving".to_string()
        } else {
            match session.identity() {
                Some(identity) => format!(
                    "signed in as {} <{}> ({})",
                    identity.name, identity.email, identity.role
                ),
                None => "signed out".to_string(),
            }
        };
        self.out().line(text)?;
        Ok(())
    }

    fn out(&mut self) -> &mut ConsoleNavigator<W> {
        self.runtime.navigator_mut()
    }
}
