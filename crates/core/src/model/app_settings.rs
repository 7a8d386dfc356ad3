use std::time::Duration;

use thiserror::Error;

/// Runtime knobs for the planner, built from env/flags by the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerSettings {
    auth_delay: Duration,
    quote_interval: Duration,
    revisions_due: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannerSettingsDraft {
    pub auth_delay_ms: Option<String>,
    pub quote_interval_secs: Option<String>,
    pub revisions_due: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlannerSettingsError {
    #[error("invalid auth delay {0:?}: expected milliseconds between 0 and 10000")]
    InvalidAuthDelay(String),
    #[error("invalid quote interval {0:?}: expected a positive number of seconds")]
    InvalidQuoteInterval(String),
    #[error("invalid revisions-due count {0:?}")]
    InvalidRevisionsDue(String),
}

pub const DEFAULT_AUTH_DELAY_MS: u64 = 1_000;
pub const MAX_AUTH_DELAY_MS: u64 = 10_000;
pub const DEFAULT_QUOTE_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REVISIONS_DUE: u32 = 3;

impl PlannerSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft. Blank values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `PlannerSettingsError` for values that do not parse or are out
    /// of range.
    pub fn validate(self) -> Result<PlannerSettings, PlannerSettingsError> {
        let auth_delay_ms = match normalize_optional(self.auth_delay_ms) {
            None => DEFAULT_AUTH_DELAY_MS,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms <= MAX_AUTH_DELAY_MS)
                .ok_or(PlannerSettingsError::InvalidAuthDelay(raw))?,
        };

        let quote_interval_secs = match normalize_optional(self.quote_interval_secs) {
            None => DEFAULT_QUOTE_INTERVAL_SECS,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(PlannerSettingsError::InvalidQuoteInterval(raw))?,
        };

        let revisions_due = match normalize_optional(self.revisions_due) {
            None => DEFAULT_REVISIONS_DUE,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| PlannerSettingsError::InvalidRevisionsDue(raw))?,
        };

        Ok(PlannerSettings {
            auth_delay: Duration::from_millis(auth_delay_ms),
            quote_interval: Duration::from_secs(quote_interval_secs),
            revisions_due,
        })
    }
}

impl PlannerSettings {
    /// Simulated latency of the stand-in login/signup backend.
    #[must_use]
    pub fn auth_delay(&self) -> Duration {
        self.auth_delay
    }

    #[must_use]
    pub fn quote_interval(&self) -> Duration {
        self.quote_interval
    }

    #[must_use]
    pub fn revisions_due(&self) -> u32 {
        self.revisions_due
    }

    /// Settings with no simulated latency, handy for tests.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            auth_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            quote_interval: Duration::from_secs(DEFAULT_QUOTE_INTERVAL_SECS),
            revisions_due: DEFAULT_REVISIONS_DUE,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_uses_defaults() {
        let settings = PlannerSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, PlannerSettings::default());
        assert_eq!(settings.quote_interval(), Duration::from_secs(30));
        assert_eq!(settings.auth_delay(), Duration::from_secs(1));
    }

    #[test]
    fn parses_overrides() {
        let settings = PlannerSettingsDraft {
            auth_delay_ms: Some(" 250 ".into()),
            quote_interval_secs: Some("5".into()),
            revisions_due: Some("0".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(settings.auth_delay(), Duration::from_millis(250));
        assert_eq!(settings.quote_interval(), Duration::from_secs(5));
        assert_eq!(settings.revisions_due(), 0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = PlannerSettingsDraft {
            auth_delay_ms: Some("60000".into()),
            ..PlannerSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, PlannerSettingsError::InvalidAuthDelay("60000".into()));

        let err = PlannerSettingsDraft {
            quote_interval_secs: Some("0".into()),
            ..PlannerSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, PlannerSettingsError::InvalidQuoteInterval("0".into()));

        assert!(
            PlannerSettingsDraft {
                revisions_due: Some("-1".into()),
                ..PlannerSettingsDraft::default()
            }
            .validate()
            .is_err()
        );
    }
}
