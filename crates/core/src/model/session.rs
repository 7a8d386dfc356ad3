use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::model::user::UserRecord;

/// Opaque bearer token handed out when a session starts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(Uuid);

impl SessionToken {
    #[must_use]
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

// Tokens stay out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// A signed-in user together with the token and the instant the session began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    user: UserRecord,
    token: SessionToken,
    started_at: DateTime<Utc>,
}

impl ActiveSession {
    #[must_use]
    pub fn new(user: UserRecord, token: SessionToken, started_at: DateTime<Utc>) -> Self {
        Self {
            user,
            token,
            started_at,
        }
    }

    #[must_use]
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserRecord {
        &mut self.user
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::generate();
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
        assert_ne!(token, SessionToken::generate());
    }
}
