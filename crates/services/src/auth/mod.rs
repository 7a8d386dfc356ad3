//! Authentication seam for the session store.
//!
//! The planner has no real account backend. `CredentialVerifier` and
//! `TokenIssuer` describe what one would have to provide; the `mock` module
//! supplies the stand-ins the app runs with.

use std::fmt;

use async_trait::async_trait;
use planner_core::model::{SessionToken, UserError, UserRecord};
use thiserror::Error;

pub mod mock;

pub use mock::{MockCredentialVerifier, UuidTokenIssuer, canned_user};

/// Errors a verifier or issuer may report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account details rejected: {0}")]
    Profile(#[from] UserError),
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Email + password pair submitted by the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account details submitted by the signup form.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub credentials: Credentials,
}

impl SignupRequest {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credentials: Credentials::new(email, password),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Checks credentials and creates accounts.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Resolve the account behind the given credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the credentials are rejected or the backend
    /// cannot be reached.
    async fn verify(&self, credentials: &Credentials) -> Result<UserRecord, AuthError>;

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the account details are rejected or the backend
    /// cannot be reached.
    async fn register(&self, request: &SignupRequest) -> Result<UserRecord, AuthError>;
}

/// Mints the token attached to a new session.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError` if no token can be issued for this user.
    fn issue(&self, user: &UserRecord) -> Result<SessionToken, AuthError>;
}
