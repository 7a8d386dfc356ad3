use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::model::subject::Progress;

/// Study activity logged for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub day: Weekday,
    pub hours: u32,
    pub topics: u32,
}

impl DailyActivity {
    #[must_use]
    pub fn new(day: Weekday, hours: u32, topics: u32) -> Self {
        Self { day, hours, topics }
    }

    /// Short label such as `Mon`.
    #[must_use]
    pub fn day_label(&self) -> String {
        self.day.to_string()
    }
}

/// Overall progress recorded at the end of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub label: String,
    pub progress: Progress,
}

impl ProgressPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, progress: Progress) -> Self {
        Self {
            label: label.into(),
            progress,
        }
    }
}
