use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::BlockId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("malformed time of day: {0:?} (expected HH:MM)")]
    MalformedTime(String),

    #[error("block must end after it starts ({start} - {end})")]
    EndNotAfterStart { start: TimeOfDay, end: TimeOfDay },

    #[error("study blocks need a priority")]
    MissingPriority,

    #[error("break blocks cannot carry a priority")]
    UnexpectedPriority,
}

//
// ─── TIME OF DAY ───────────────────────────────────────────────────────────────
//

/// Wall-clock time with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::MalformedTime` when hour > 23 or minute > 59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ScheduleError::MalformedTime(format!("{hour}:{minute}")))
    }

    /// `HH:00`, wrapping hours past midnight.
    #[must_use]
    pub fn on_the_hour(hour: u32) -> Self {
        Self(NaiveTime::MIN + TimeDelta::hours(i64::from(hour % 24)))
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    #[must_use]
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let malformed = || ScheduleError::MalformedTime(s.to_string());
        let (hour, minute) = raw.split_once(':').ok_or_else(malformed)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(malformed)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

//
// ─── BLOCK KIND / PRIORITY ─────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Study,
    Revision,
    Break,
    Review,
}

impl BlockKind {
    #[must_use]
    pub fn is_break(self) -> bool {
        matches!(self, BlockKind::Break)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

//
// ─── SCHEDULE BLOCK ────────────────────────────────────────────────────────────
//

/// A single timed entry in the daily plan.
///
/// Non-break blocks always carry a priority; breaks never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    id: BlockId,
    kind: BlockKind,
    start: TimeOfDay,
    end: TimeOfDay,
    subject_name: Option<String>,
    topic_name: Option<String>,
    priority: Option<Priority>,
    reason: String,
}

impl ScheduleBlock {
    /// Creates a validated block.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError` when the block does not end after it starts or
    /// when the priority does not match the block kind.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BlockId,
        kind: BlockKind,
        start: TimeOfDay,
        end: TimeOfDay,
        subject_name: Option<String>,
        topic_name: Option<String>,
        priority: Option<Priority>,
        reason: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        if end <= start {
            return Err(ScheduleError::EndNotAfterStart { start, end });
        }
        match (kind.is_break(), priority) {
            (true, Some(_)) => return Err(ScheduleError::UnexpectedPriority),
            (false, None) => return Err(ScheduleError::MissingPriority),
            _ => {}
        }

        Ok(Self {
            id,
            kind,
            start,
            end,
            subject_name: normalize_optional(subject_name),
            topic_name: normalize_optional(topic_name),
            priority,
            reason: reason.into(),
        })
    }

    /// Convenience constructor taking `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::MalformedTime` for unparsable times, otherwise
    /// the same errors as [`ScheduleBlock::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        id: BlockId,
        kind: BlockKind,
        start: &str,
        end: &str,
        subject_name: Option<&str>,
        topic_name: Option<&str>,
        priority: Option<Priority>,
        reason: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        Self::new(
            id,
            kind,
            start.parse()?,
            end.parse()?,
            subject_name.map(str::to_owned),
            topic_name.map(str::to_owned),
            priority,
            reason,
        )
    }

    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    #[must_use]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    #[must_use]
    pub fn subject_name(&self) -> Option<&str> {
        self.subject_name.as_deref()
    }

    #[must_use]
    pub fn topic_name(&self) -> Option<&str> {
        self.topic_name.as_deref()
    }

    #[must_use]
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Whole hours between start and end, ignoring minutes.
    #[must_use]
    pub fn whole_hours(&self) -> u32 {
        self.end.hour().saturating_sub(self.start.hour())
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
