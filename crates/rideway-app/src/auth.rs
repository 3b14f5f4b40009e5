//! Auth collaborator seam.
//!
//! The router never talks to an auth backend: it only sees the snapshots the
//! provider publishes into its [`SessionStore`]. Every failure surfaces there
//! as a resolved session without identity; the typed [`AuthError`] goes back
//! to whoever called the operation.

use std::{collections::HashMap, future::Future};

use rideway_core::{Identity, Role, Session, UserId};
use thiserror::Error;

use crate::{SessionStore, SessionSubscription};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authentication failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Sign-up for an email that already has an account.
    #[error("an account already exists for {email}")]
    AccountExists {
        /// Normalized email.
        email: String,
    },

    /// Email without a local part or domain.
    #[error("invalid email address '{email}'")]
    InvalidEmail {
        /// Rejected input.
        email: String,
    },

    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("password must be at least {min} characters")]
    WeakPassword {
        /// Required length.
        min: usize,
    },
}

/// Sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Sign-in email.
    pub email: String,
    /// Plain password.
    pub password: String,
    /// Display name. Defaults to the email's local part.
    pub name: Option<String>,
    /// Role of the new account.
    pub role: Role,
}

/// The authentication provider consumed by the app.
///
/// Implementations own the session and publish every change to it,
/// including the resolving state while a check is in flight.
pub trait AuthProvider: Send {
    /// Provider-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Resolve the initial session from persisted credentials.
    fn restore(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Sign in with email and password.
    fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, Self::Error>> + Send;

    /// Create an account and sign it in.
    fn signup(
        &mut self,
        request: SignupRequest,
    ) -> impl Future<Output = Result<Identity, Self::Error>> + Send;

    /// Sign out and forget persisted credentials.
    fn logout(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Current session snapshot.
    fn session(&self) -> &Session;

    /// Subscribe to session changes.
    fn subscribe(&mut self) -> SessionSubscription;
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
}

/// In-memory account directory implementing [`AuthProvider`].
///
/// Stands in for the hosted auth backend in the console shell and in tests.
/// "Persisted credentials" are the email remembered by the last successful
/// sign-in.
#[derive(Debug)]
pub struct MemoryAuth {
    store: SessionStore,
    /// Accounts keyed by normalized email.
    accounts: HashMap<String, Account>,
    /// Email restored on [`AuthProvider::restore`]. `None` if signed out.
    remembered: Option<String>,
    next_user_id: UserId,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuth {
    /// Create an empty directory whose session is still resolving.
    pub fn new() -> Self {
        Self {
            store: SessionStore::new(),
            accounts: HashMap::new(),
            remembered: None,
            next_user_id: 1,
        }
    }

    /// Register an account without signing it in.
    pub fn add_account(&mut self, request: SignupRequest) -> Result<Identity, AuthError> {
        let email = normalize_email(&request.email)?;
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword { min: MIN_PASSWORD_LEN });
        }
        if self.accounts.contains_key(&email) {
            return Err(AuthError::AccountExists { email });
        }

        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        let identity = Identity::new(self.next_user_id, email.clone(), name, request.role);
        self.next_user_id += 1;

        self.accounts
            .insert(email, Account { identity: identity.clone(), password: request.password });
        Ok(identity)
    }

    /// Mark an account as persisted, as if it signed in on a previous run.
    pub fn remember(&mut self, email: &str) -> Result<(), AuthError> {
        let email = normalize_email(email)?;
        if !self.accounts.contains_key(&email) {
            return Err(AuthError::InvalidCredentials);
        }
        self.remembered = Some(email);
        Ok(())
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn begin_check(&mut self) {
        let resolving = self.store.current().clone().into_resolving();
        self.store.publish(resolving);
    }

    fn sign_in(&mut self, identity: Identity) {
        self.remembered = Some(identity.email.clone());
        tracing::info!(user_id = identity.user_id, role = %identity.role, "signed in");
        self.store.publish(Session::signed_in(identity));
    }

    fn sign_out(&mut self) {
        self.remembered = None;
        self.store.publish(Session::anonymous());
    }
}

impl AuthProvider for MemoryAuth {
    type Error = AuthError;

    async fn restore(&mut self) -> Result<(), AuthError> {
        self.begin_check();

        let restored = self
            .remembered
            .as_ref()
            .and_then(|email| self.accounts.get(email))
            .map(|account| account.identity.clone());

        match restored {
            Some(identity) => self.sign_in(identity),
            None => {
                tracing::debug!("no persisted credentials");
                self.sign_out();
            },
        }
        Ok(())
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.begin_check();

        let account = normalize_email(email)
            .ok()
            .and_then(|email| self.accounts.get(&email))
            .filter(|account| account.password == password)
            .map(|account| account.identity.clone());

        match account {
            Some(identity) => {
                self.sign_in(identity.clone());
                Ok(identity)
            },
            None => {
                tracing::warn!("sign-in rejected");
                self.sign_out();
                Err(AuthError::InvalidCredentials)
            },
        }
    }

    async fn signup(&mut self, request: SignupRequest) -> Result<Identity, AuthError> {
        self.begin_check();

        match self.add_account(request) {
            Ok(identity) => {
                self.sign_in(identity.clone());
                Ok(identity)
            },
            Err(e) => {
                tracing::warn!(error = %e, "sign-up rejected");
                self.sign_out();
                Err(e)
            },
        }
    }

    async fn logout(&mut self) -> Result<(), AuthError> {
        tracing::info!("signed out");
        self.sign_out();
        Ok(())
    }

    fn session(&self) -> &Session {
        self.store.current()
    }

    fn subscribe(&mut self) -> SessionSubscription {
        self.store.subscribe()
    }
}

/// Trim and lowercase an email, rejecting inputs without `local@domain`.
fn normalize_email(email: &str) -> Result<String, AuthError> {
    let normalized = email.trim().to_lowercase();
    let valid = normalized.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    });
    if !valid {
        return Err(AuthError::InvalidEmail { email: email.to_string() });
    }
    Ok(normalized)
}
