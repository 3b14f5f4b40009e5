//! Shell command parsing.
//!
//! One command per line. Parsing never fails: malformed input maps to
//! [`Command::Unknown`] or [`Command::InvalidArgs`] so the shell can report
//! it and keep reading.

use rideway_app::SignupRequest;
use rideway_core::Role;

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line or `#` comment.
    Empty,
    /// Re-run the persisted-credential check.
    Restore,
    /// Sign in.
    Login {
        /// Sign-in email.
        email: String,
        /// Plain password.
        password: String,
    },
    /// Create an account and sign in.
    Signup(SignupRequest),
    /// Sign out.
    Logout,
    /// Navigate into a role's guarded tree.
    Open {
        /// Tree to enter.
        role: Role,
    },
    /// Print the current session.
    WhoAmI,
    /// Stop reading commands.
    Quit,
    /// Unrecognized command word.
    Unknown {
        /// The command word.
        input: String,
    },
    /// Known command with bad arguments.
    InvalidArgs {
        /// Command word.
        command: &'static str,
        /// What was wrong.
        error: String,
    },
}

/// Parse one shell line.
pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Command::Empty;
    }

    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Command::Empty;
    };
    let args: Vec<&str> = words.collect();

    match word.to_ascii_lowercase().as_str() {
        "restore" => no_args("restore", &args, Command::Restore),
        "logout" => no_args("logout", &args, Command::Logout),
        "whoami" => no_args("whoami", &args, Command::WhoAmI),
        "quit" | "exit" => Command::Quit,
        "login" => match args.as_slice() {
            [email, password] => {
                Command::Login { email: (*email).to_string(), password: (*password).to_string() }
            },
            _ => invalid("login", "usage: login <email> <password>"),
        },
        "signup" => parse_signup(&args),
        "open" => match args.as_slice() {
            [role] => match role.parse::<Role>() {
                Ok(role) => Command::Open { role },
                Err(e) => invalid("open", e.to_string()),
            },
            _ => invalid("open", "usage: open <vendor|driver>"),
        },
        _ => Command::Unknown { input: word.to_string() },
    }
}

fn parse_signup(args: &[&str]) -> Command {
    let [email, password, role, name @ ..] = args else {
        return invalid("signup", "usage: signup <email> <password> <role> [name]");
    };

    let role = match role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return invalid("signup", e.to_string()),
    };
    let name = if name.is_empty() { None } else { Some(name.join(" ")) };

    Command::Signup(SignupRequest {
        email: (*email).to_string(),
        password: (*password).to_string(),
        name,
        role,
    })
}

fn no_args(command: &'static str, args: &[&str], parsed: Command) -> Command {
    if args.is_empty() { parsed } else { invalid(command, "takes no arguments") }
}

fn invalid(command: &'static str, error: impl Into<String>) -> Command {
    Command::InvalidArgs { command, error: error.into() }
}
