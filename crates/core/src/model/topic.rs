use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TopicId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic name cannot be empty")]
    EmptyName,

    #[error("difficulty must be between 1 and 5, got {0}")]
    DifficultyOutOfRange(u8),
}

/// Where a topic sits in the learn → revise cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    New,
    Learning,
    Revised,
}

impl TopicStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TopicStatus::New => "New",
            TopicStatus::Learning => "Learning",
            TopicStatus::Revised => "Revised",
        }
    }

    /// Share of the topic counted as done when deriving subject progress.
    #[must_use]
    pub(crate) fn completion_weight(self) -> f64 {
        match self {
            TopicStatus::New => 0.0,
            TopicStatus::Learning => 0.5,
            TopicStatus::Revised => 1.0,
        }
    }
}

/// Difficulty rating on a 1-5 star scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `TopicError::DifficultyOutOfRange` outside 1..=5.
    pub fn new(value: u8) -> Result<Self, TopicError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TopicError::DifficultyOutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = TopicError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    id: TopicId,
    name: String,
    status: TopicStatus,
    difficulty: Difficulty,
    last_studied: Option<NaiveDate>,
    ai_estimated: bool,
}

impl Topic {
    /// # Errors
    ///
    /// Returns `TopicError::EmptyName` if the name is blank.
    pub fn new(
        id: TopicId,
        name: impl Into<String>,
        status: TopicStatus,
        difficulty: Difficulty,
    ) -> Result<Self, TopicError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TopicError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            status,
            difficulty,
            last_studied: None,
            ai_estimated: false,
        })
    }

    #[must_use]
    pub fn with_last_studied(mut self, date: NaiveDate) -> Self {
        self.last_studied = Some(date);
        self
    }

    /// Marks the difficulty as an estimate rather than a user rating.
    #[must_use]
    pub fn with_ai_estimate(mut self) -> Self {
        self.ai_estimated = true;
        self
    }

    #[must_use]
    pub fn id(&self) -> TopicId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn status(&self) -> TopicStatus {
        self.status
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn last_studied(&self) -> Option<NaiveDate> {
        self.last_studied
    }

    #[must_use]
    pub fn is_ai_estimated(&self) -> bool {
        self.ai_estimated
    }
}
