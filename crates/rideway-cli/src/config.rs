//! Shell configuration.

use std::str::FromStr;

use rideway_app::SignupRequest;
use rideway_core::{AppProfile, ParseRoleError, Role};
use thiserror::Error;

/// Malformed `--account` value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSeedError {
    /// Fewer than three `:`-separated fields.
    #[error("expected email:password:role[:name], got '{0}'")]
    Format(String),

    /// Role field is not a role.
    #[error(transparent)]
    Role(#[from] ParseRoleError),
}

/// Account registered before the shell starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    /// Sign-in email.
    pub email: String,
    /// Plain password.
    pub password: String,
    /// Account role.
    pub role: Role,
    /// Display name.
    pub name: Option<String>,
}

impl SeedAccount {
    /// Registration form for this account.
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

impl FromStr for SeedAccount {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.splitn(4, ':');
        let (Some(email), Some(password), Some(role)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseSeedError::Format(s.to_string()));
        };

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
            role: role.parse()?,
            name: fields.next().map(str::to_string).filter(|name| !name.is_empty()),
        })
    }
}

/// Shell configuration.
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    /// App build to emulate.
    pub profile: AppProfile,
    /// Accounts registered at startup.
    pub accounts: Vec<SeedAccount>,
    /// Email whose sign-in persisted from a previous run.
    pub remember: Option<String>,
}
