use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::gamification::level_for_xp;
use crate::model::ids::UserId;
use crate::model::schedule::{ScheduleError, TimeOfDay};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("display name cannot be empty")]
    EmptyName,

    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("badge identifier cannot be empty")]
    EmptyBadge,

    #[error("study start time is required")]
    MissingStartTime,

    #[error(transparent)]
    Time(#[from] ScheduleError),

    #[error("study end time must be after the start time")]
    EndBeforeStart,

    #[error("break duration must be one of 30, 45 or 60 minutes, got {0:?}")]
    UnsupportedBreakDuration(String),
}

//
// ─── BADGES ────────────────────────────────────────────────────────────────────
//

/// Identifier of an earned badge, e.g. `consistency_champ`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BadgeId(String);

impl BadgeId {
    /// # Errors
    ///
    /// Returns `UserError::EmptyBadge` if the identifier is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, UserError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserError::EmptyBadge);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── STUDY PREFERENCES ─────────────────────────────────────────────────────────
//

/// Break lengths the planner offers.
pub const BREAK_DURATION_CHOICES: [u32; 3] = [30, 45, 60];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPreferences {
    start_time: TimeOfDay,
    end_time: Option<TimeOfDay>,
    break_minutes: u32,
    lunch_time: Option<TimeOfDay>,
}

impl StudyPreferences {
    #[must_use]
    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> Option<TimeOfDay> {
        self.end_time
    }

    #[must_use]
    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    #[must_use]
    pub fn lunch_time(&self) -> Option<TimeOfDay> {
        self.lunch_time
    }
}

impl Default for StudyPreferences {
    /// Evening study window: 17:00-22:00, 30 minute breaks, lunch at 19:00.
    fn default() -> Self {
        Self {
            start_time: TimeOfDay::on_the_hour(17),
            end_time: Some(TimeOfDay::on_the_hour(22)),
            break_minutes: 30,
            lunch_time: Some(TimeOfDay::on_the_hour(19)),
        }
    }
}

/// Raw form input for study preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyPreferencesDraft {
    pub start_time: String,
    pub end_time: String,
    pub break_minutes: String,
    pub lunch_time: String,
}

impl Default for StudyPreferencesDraft {
    fn default() -> Self {
        Self {
            start_time: "17:00".into(),
            end_time: "22:00".into(),
            break_minutes: "30".into(),
            lunch_time: "19:00".into(),
        }
    }
}

impl StudyPreferencesDraft {
    #[must_use]
    pub fn from_preferences(prefs: &StudyPreferences) -> Self {
        Self {
            start_time: prefs.start_time.to_string(),
            end_time: prefs.end_time.map(|t| t.to_string()).unwrap_or_default(),
            break_minutes: prefs.break_minutes.to_string(),
            lunch_time: prefs.lunch_time.map(|t| t.to_string()).unwrap_or_default(),
        }
    }

    /// Validate the form into preferences.
    ///
    /// Blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `UserError` for a missing or malformed start time, malformed
    /// optional times, an end time not after the start, or a break duration
    /// outside [`BREAK_DURATION_CHOICES`].
    pub fn validate(self) -> Result<StudyPreferences, UserError> {
        let start = self.start_time.trim();
        if start.is_empty() {
            return Err(UserError::MissingStartTime);
        }
        let start_time: TimeOfDay = start.parse()?;
        let end_time = parse_optional_time(&self.end_time)?;
        let lunch_time = parse_optional_time(&self.lunch_time)?;

        if let Some(end) = end_time {
            if end <= start_time {
                return Err(UserError::EndBeforeStart);
            }
        }

        let break_minutes = self
            .break_minutes
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| BREAK_DURATION_CHOICES.contains(m))
            .ok_or_else(|| UserError::UnsupportedBreakDuration(self.break_minutes.clone()))?;

        Ok(StudyPreferences {
            start_time,
            end_time,
            break_minutes,
            lunch_time,
        })
    }
}

fn parse_optional_time(raw: &str) -> Result<Option<TimeOfDay>, UserError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.parse()?))
}

//
// ─── USER RECORD ───────────────────────────────────────────────────────────────
//

/// The signed-in user. Level is derived from XP and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    avatar: Option<String>,
    xp: u64,
    streak: u32,
    badges: BTreeSet<BadgeId>,
    preferences: StudyPreferences,
}

impl UserRecord {
    /// A fresh account: no XP, no streak, no badges, default preferences.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the name or email is blank.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserError> {
        Ok(Self {
            id,
            name: normalize_required(name.into(), UserError::EmptyName)?,
            email: normalize_required(email.into(), UserError::EmptyEmail)?,
            avatar: None,
            xp: 0,
            streak: 0,
            badges: BTreeSet::new(),
            preferences: StudyPreferences::default(),
        })
    }

    /// A fresh account built from whatever the signup form submitted.
    ///
    /// Name and email are trimmed but never rejected; a blank name falls back
    /// to the generic greeting downstream.
    #[must_use]
    pub fn from_signup(id: UserId, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            avatar: None,
            xp: 0,
            streak: 0,
            badges: BTreeSet::new(),
            preferences: StudyPreferences::default(),
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = normalize_optional(Some(avatar.into()));
        self
    }

    #[must_use]
    pub fn with_xp(mut self, xp: u64) -> Self {
        self.xp = xp;
        self
    }

    #[must_use]
    pub fn with_streak(mut self, streak: u32) -> Self {
        self.streak = streak;
        self
    }

    #[must_use]
    pub fn with_badges(mut self, badges: impl IntoIterator<Item = BadgeId>) -> Self {
        self.badges = badges.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_preferences(mut self, preferences: StudyPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn level(&self) -> u64 {
        level_for_xp(self.xp)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn badges(&self) -> &BTreeSet<BadgeId> {
        &self.badges
    }

    #[must_use]
    pub fn preferences(&self) -> &StudyPreferences {
        &self.preferences
    }

    /// Adds XP without overflowing. Returns the new total.
    pub fn gain_xp(&mut self, amount: u64) -> u64 {
        self.xp = self.xp.saturating_add(amount);
        self.xp
    }

    /// Merge the fields present in `patch`; absent fields keep their value.
    ///
    /// The record is untouched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if a patched name or email is blank.
    pub fn apply(&mut self, patch: UserPatch) -> Result<(), UserError> {
        let name = patch
            .name
            .map(|n| normalize_required(n, UserError::EmptyName))
            .transpose()?;
        let email = patch
            .email
            .map(|e| normalize_required(e, UserError::EmptyEmail))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = normalize_optional(avatar);
        }
        if let Some(xp) = patch.xp {
            self.xp = xp;
        }
        if let Some(streak) = patch.streak {
            self.streak = streak;
        }
        if let Some(badges) = patch.badges {
            self.badges = badges;
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = preferences;
        }
        Ok(())
    }
}

/// Partial update for a [`UserRecord`]. `None` leaves a field unchanged;
/// `avatar: Some(None)` clears the avatar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub xp: Option<u64>,
    pub streak: Option<u32>,
    pub badges: Option<BTreeSet<BadgeId>>,
    pub preferences: Option<StudyPreferences>,
}

impl UserPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn normalize_required(value: String, err: UserError) -> Result<String, UserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
