use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::SubjectId;
use crate::model::topic::{Topic, TopicStatus};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject name cannot be empty")]
    EmptyName,

    #[error("subject color must be a #rrggbb hex value, got {0:?}")]
    InvalidColor(String),

    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(u32),
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Whole-number percentage in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Progress(u8);

impl Progress {
    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(100);

    /// # Errors
    ///
    /// Returns `SubjectError::ProgressOutOfRange` above 100.
    pub fn new(percent: u32) -> Result<Self, SubjectError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(SubjectError::ProgressOutOfRange(percent))
    }

    /// Rounds a ratio in `0.0..=1.0` to a percentage, clamping stray values.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_ratio(ratio: f64) -> Self {
        if !ratio.is_finite() {
            return Self::ZERO;
        }
        Self((ratio.clamp(0.0, 1.0) * 100.0).round() as u8)
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Progress {
    type Error = SubjectError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u32 {
    fn from(value: Progress) -> Self {
        u32::from(value.0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── COLOR ─────────────────────────────────────────────────────────────────────
//

/// Display color tag, stored as lowercase `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectColor(String);

impl SubjectColor {
    /// # Errors
    ///
    /// Returns `SubjectError::InvalidColor` unless the value is `#` followed by
    /// six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let valid = trimmed.len() == 7
            && trimmed.starts_with('#')
            && trimmed[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(SubjectError::InvalidColor(raw));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubjectColor {
    type Error = SubjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectColor> for String {
    fn from(value: SubjectColor) -> Self {
        value.0
    }
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// A subject with an exam date and an ordered list of topics.
///
/// Progress is always derived from the topic statuses, so it cannot drift from
/// the topics it summarises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    name: String,
    color: SubjectColor,
    exam_date: NaiveDate,
    xp_earned: u64,
    topics: Vec<Topic>,
}

impl Subject {
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyName` if the name is blank.
    pub fn new(
        id: SubjectId,
        name: impl Into<String>,
        color: SubjectColor,
        exam_date: NaiveDate,
        xp_earned: u64,
        topics: Vec<Topic>,
    ) -> Result<Self, SubjectError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SubjectError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            color,
            exam_date,
            xp_earned,
            topics,
        })
    }

    #[must_use]
    pub fn id(&self) -> SubjectId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> &SubjectColor {
        &self.color
    }

    #[must_use]
    pub fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    #[must_use]
    pub fn xp_earned(&self) -> u64 {
        self.xp_earned
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn count_with_status(&self, status: TopicStatus) -> usize {
        self.topics.iter().filter(|t| t.status() == status).count()
    }

    /// Revised topics over all topics; 0 for a subject without topics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_ratio(&self) -> f64 {
        if self.topics.is_empty() {
            return 0.0;
        }
        self.count_with_status(TopicStatus::Revised) as f64 / self.topics.len() as f64
    }

    /// New topics count 0, learning topics half, revised topics fully.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> Progress {
        if self.topics.is_empty() {
            return Progress::ZERO;
        }
        let done: f64 = self
            .topics
            .iter()
            .map(|t| t.status().completion_weight())
            .sum();
        Progress::from_ratio(done / self.topics.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::TopicId;
    use crate::model::topic::Difficulty;

    fn topic(id: u64, status: TopicStatus) -> Topic {
        Topic::new(TopicId::new(id), format!("T{id}"), status, Difficulty::new(2).unwrap())
            .unwrap()
    }

    fn subject(topics: Vec<Topic>) -> Subject {
        Subject::new(
            SubjectId::new(1),
            "Physics",
            SubjectColor::new("#3B82F6").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            120,
            topics,
        )
        .unwrap()
    }

    #[test]
    fn progress_rejects_values_above_hundred() {
        assert_eq!(Progress::new(100).unwrap(), Progress::COMPLETE);
        assert_eq!(
            Progress::new(101).unwrap_err(),
            SubjectError::ProgressOutOfRange(101)
        );
        assert_eq!(
            Progress::new(300).unwrap_err(),
            SubjectError::ProgressOutOfRange(300)
        );
    }

    #[test]
    fn progress_from_ratio_clamps_and_rounds() {
        assert_eq!(Progress::from_ratio(0.666).percent(), 67);
        assert_eq!(Progress::from_ratio(1.4), Progress::COMPLETE);
        assert_eq!(Progress::from_ratio(f64::NAN), Progress::ZERO);
        assert_eq!(Progress::from_ratio(0.5).to_string(), "50%");
    }

    #[test]
    fn color_must_be_hex() {
        assert_eq!(SubjectColor::new("#3B82F6").unwrap().as_str(), "#3b82f6");
        assert!(SubjectColor::new("blue").is_err());
        assert!(SubjectColor::new("#12345g").is_err());
    }

    #[test]
    fn progress_is_derived_from_topic_statuses() {
        let s = subject(vec![
            topic(1, TopicStatus::Revised),
            topic(2, TopicStatus::Learning),
            topic(3, TopicStatus::New),
            topic(4, TopicStatus::Revised),
        ]);
        // (1 + 0.5 + 0 + 1) / 4 = 62.5%
        assert_eq!(s.progress().percent(), 63);
        assert!((s.completion_ratio() - 0.5).abs() < f64::EPSILON);
        assert_eq!(s.count_with_status(TopicStatus::Learning), 1);
    }

    #[test]
    fn empty_subject_has_zero_progress() {
        let s = subject(Vec::new());
        assert_eq!(s.progress(), Progress::ZERO);
        assert!(s.completion_ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn subject_name_required() {
        let err = Subject::new(
            SubjectId::new(1),
            "",
            SubjectColor::new("#000000").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            0,
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err, SubjectError::EmptyName);
    }
}
