//! Session snapshot published by the auth collaborator.
//!
//! A [`Session`] is immutable from the router's point of view: every change
//! produces a new snapshot. The role lives inside [`Identity`], so a role can
//! only be observed when an identity is present.

use std::{fmt, str::FromStr};

use crate::ParseRoleError;

/// Account identifier assigned by the auth provider.
pub type UserId = u64;

/// Role a signed-in account holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Vendor (fleet owner) account.
    Vendor,
    /// Driver account.
    Driver,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 2] = [Role::Vendor, Role::Driver];

    /// Lowercase name used in commands and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Vendor => "vendor",
            Role::Driver => "driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vendor" => Ok(Role::Vendor),
            "driver" => Ok(Role::Driver),
            _ => Err(ParseRoleError { input: s.to_string() }),
        }
    }
}

/// A resolved user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account identifier.
    pub user_id: UserId,
    /// Normalized sign-in email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role the account holds.
    pub role: Role,
}

impl Identity {
    /// Create an identity.
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self { user_id, email: email.into(), name: name.into(), role }
    }
}

/// Whether the auth collaborator has finished checking credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// A credential check is in flight.
    Resolving,
    /// The identity field is authoritative.
    Resolved,
}

/// Authentication snapshot for the active device user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Resolved user, `None` if signed out.
    pub identity: Option<Identity>,
    /// Credential check state.
    pub resolution: Resolution,
}

impl Session {
    /// Initial state before persisted credentials are read.
    pub fn resolving() -> Self {
        Self { identity: None, resolution: Resolution::Resolving }
    }

    /// Resolved with nobody signed in.
    pub fn anonymous() -> Self {
        Self { identity: None, resolution: Resolution::Resolved }
    }

    /// Resolved with the given identity signed in.
    pub fn signed_in(identity: Identity) -> Self {
        Self { identity: Some(identity), resolution: Resolution::Resolved }
    }

    /// Same identity, with a new credential check in flight.
    #[must_use]
    pub fn into_resolving(self) -> Self {
        Self { identity: self.identity, resolution: Resolution::Resolving }
    }

    /// Credential check in flight.
    pub fn is_resolving(&self) -> bool {
        self.resolution == Resolution::Resolving
    }

    /// Signed-in identity. `None` if signed out.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Role of the signed-in identity. `None` if signed out.
    ///
    /// Callers must not branch on this while [`Session::is_resolving`].
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::resolving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Vendor".parse::<Role>(), Ok(Role::Vendor));
        assert_eq!(" driver ".parse::<Role>(), Ok(Role::Driver));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_display_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn into_resolving_keeps_identity() {
        let identity = Identity::new(7, "a@b.co", "Ann", Role::Driver);
        let session = Session::signed_in(identity.clone()).into_resolving();

        assert!(session.is_resolving());
        assert_eq!(session.identity(), Some(&identity));
    }

    #[test]
    fn default_session_is_resolving() {
        let session = Session::default();
        assert!(session.is_resolving());
        assert!(session.role().is_none());
    }
}
