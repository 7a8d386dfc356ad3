use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use planner_core::model::{
    ActiveSession, SessionToken, StudyPreferencesDraft, UserPatch, UserRecord,
};

use crate::Clock;
use crate::auth::{CredentialVerifier, Credentials, SignupRequest, TokenIssuer};
use crate::error::SessionError;

/// Result of an XP award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    pub xp: u64,
    pub level: u64,
    pub leveled_up: bool,
}

/// Owns the signed-in user for the lifetime of the app.
///
/// Created once at startup and torn down at logout or shutdown. Views read
/// clones of the record; only the methods below change it.
pub struct SessionStore {
    clock: Clock,
    verifier: Arc<dyn CredentialVerifier>,
    issuer: Arc<dyn TokenIssuer>,
    state: Mutex<Option<ActiveSession>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(
        clock: Clock,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            clock,
            verifier,
            issuer,
            state: Mutex::new(None),
        }
    }

    // Every mutation is a single assignment, so a poisoned lock still guards
    // a consistent value.
    fn state(&self) -> MutexGuard<'_, Option<ActiveSession>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sign in and replace whatever session was active.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Auth` if the verifier or token issuer rejects the
    /// attempt; the previous session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord, SessionError> {
        let credentials = Credentials::new(email, password);
        let user = match self.verifier.verify(&credentials).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "login rejected");
                return Err(err.into());
            }
        };
        self.install(user)
    }

    /// Create an account and sign into it.
    ///
    /// The new record always starts with zero XP, level 1, no streak and no
    /// badges, whatever session was active before.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Auth` if the account details are rejected.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, SessionError> {
        let request = SignupRequest::new(name, email, password);
        let registered = match self.verifier.register(&request).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "signup rejected");
                return Err(err.into());
            }
        };
        let fresh = registered.with_xp(0).with_streak(0).with_badges([]);
        self.install(fresh)
    }

    fn install(&self, user: UserRecord) -> Result<UserRecord, SessionError> {
        let token = self.issuer.issue(&user)?;
        let session = ActiveSession::new(user.clone(), token, self.clock.now());
        let replaced = self.state().replace(session).is_some();
        tracing::info!(user_id = %user.id(), replaced, "session started");
        Ok(user)
    }

    /// Drop the active session. Returns whether one was present.
    pub fn logout(&self) -> bool {
        let previous = self.state().take();
        if let Some(session) = &previous {
            tracing::info!(user_id = %session.user().id(), "session ended");
        }
        previous.is_some()
    }

    /// Merge `patch` into the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a session (nothing is
    /// created), or `SessionError::User` if the patch fails validation.
    pub fn update_user(&self, patch: UserPatch) -> Result<UserRecord, SessionError> {
        let mut state = self.state();
        let Some(session) = state.as_mut() else {
            tracing::warn!("update_user called without a session");
            return Err(SessionError::NotAuthenticated);
        };
        session.user_mut().apply(patch)?;
        Ok(session.user().clone())
    }

    /// Award XP and recompute the level.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a session; nothing is
    /// created.
    pub fn add_xp(&self, amount: u64) -> Result<XpGain, SessionError> {
        let mut state = self.state();
        let Some(session) = state.as_mut() else {
            tracing::warn!(amount, "add_xp called without a session");
            return Err(SessionError::NotAuthenticated);
        };
        let user = session.user_mut();
        let level_before = user.level();
        let xp = user.gain_xp(amount);
        let level = user.level();
        tracing::debug!(amount, xp, level, "xp awarded");
        Ok(XpGain {
            xp,
            level,
            leveled_up: level > level_before,
        })
    }

    /// Validate the schedule preference form and store it on the user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::User` for invalid input, or
    /// `SessionError::NotAuthenticated` without a session.
    pub fn save_preferences(
        &self,
        draft: StudyPreferencesDraft,
    ) -> Result<UserRecord, SessionError> {
        let preferences = draft.validate()?;
        self.update_user(UserPatch {
            preferences: Some(preferences),
            ..UserPatch::default()
        })
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.state().as_ref().map(|s| s.user().clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.state().as_ref().map(ActiveSession::token)
    }
}
