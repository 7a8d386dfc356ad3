use std::time::Duration;

use async_trait::async_trait;
use planner_core::model::{
    BadgeId, SessionToken, StudyPreferences, UserError, UserId, UserRecord,
};

use super::{AuthError, CredentialVerifier, Credentials, SignupRequest, TokenIssuer};

/// The demo account every login resolves to.
///
/// # Errors
///
/// Returns `UserError` only if the hard-coded profile stops validating.
pub fn canned_user() -> Result<UserRecord, UserError> {
    let badges = ["early_finisher", "consistency_champ", "revision_master"]
        .into_iter()
        .map(BadgeId::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UserRecord::new(UserId::new(1), "Madhu", "madhu@example.com")?
        .with_xp(2450)
        .with_streak(7)
        .with_badges(badges)
        .with_preferences(StudyPreferences::default()))
}

/// Accepts any credentials after a simulated round trip.
#[derive(Debug, Clone, Copy)]
pub struct MockCredentialVerifier {
    delay: Duration,
}

impl MockCredentialVerifier {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for MockCredentialVerifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, _credentials: &Credentials) -> Result<UserRecord, AuthError> {
        self.simulate_latency().await;
        Ok(canned_user()?)
    }

    async fn register(&self, request: &SignupRequest) -> Result<UserRecord, AuthError> {
        self.simulate_latency().await;
        let canned = canned_user()?;
        let fresh = UserRecord::from_signup(canned.id(), &request.name, &request.credentials.email)
            .with_preferences(canned.preferences().clone());
        Ok(fresh)
    }
}

/// Issues random v4 UUID tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenIssuer;

impl TokenIssuer for UuidTokenIssuer {
    fn issue(&self, _user: &UserRecord) -> Result<SessionToken, AuthError> {
        Ok(SessionToken::generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_user_matches_demo_profile() {
        let user = canned_user().unwrap();
        assert_eq!(user.name(), "Madhu");
        assert_eq!(user.xp(), 2450);
        assert_eq!(user.level(), 5);
        assert_eq!(user.streak(), 7);
        assert_eq!(user.badges().len(), 3);
    }

    #[tokio::test]
    async fn verify_ignores_credentials() {
        let verifier = MockCredentialVerifier::new(Duration::ZERO);
        let user = verifier
            .verify(&Credentials::new("", "wrong"))
            .await
            .unwrap();
        assert_eq!(user.email(), "madhu@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn register_waits_for_the_simulated_delay() {
        let verifier = MockCredentialVerifier::new(Duration::from_millis(1_000));
        let started = tokio::time::Instant::now();
        let user = verifier
            .register(&SignupRequest::new("Ravi Kumar", "ravi@example.com", "pw"))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1_000));
        assert_eq!(user.name(), "Ravi Kumar");
        assert_eq!(user.xp(), 0);
        assert!(user.badges().is_empty());
    }

    #[tokio::test]
    async fn register_accepts_blank_details() {
        let verifier = MockCredentialVerifier::new(Duration::ZERO);
        let user = verifier
            .register(&SignupRequest::new(" ", "", "pw"))
            .await
            .unwrap();
        assert_eq!(user.name(), "");
        assert_eq!(user.email(), "");
        assert_eq!(user.xp(), 0);
    }
}
