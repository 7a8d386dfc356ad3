use std::sync::Arc;

use chrono::NaiveDate;
use planner_core::model::{DailyActivity, Progress, ProgressPoint};
use planner_core::planner::{StatusBreakdown, WeeklyTotals, weekly_totals};
use serde::Serialize;
use storage::{ActivityRepository, SubjectRepository};

use crate::Clock;
use crate::error::ReportError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectProgressRow {
    pub name: String,
    pub color: String,
    pub topic_count: usize,
    pub progress: Progress,
}

/// Weekly study report, also the payload of the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyReport {
    pub generated_on: NaiveDate,
    pub totals: WeeklyTotals,
    pub completion_rate: Progress,
    pub week: Vec<DailyActivity>,
    pub topic_status: StatusBreakdown,
    pub trend: Vec<ProgressPoint>,
    pub subjects: Vec<SubjectProgressRow>,
}

#[derive(Clone)]
pub struct ReportService {
    clock: Clock,
    subjects: Arc<dyn SubjectRepository>,
    activity: Arc<dyn ActivityRepository>,
}

impl ReportService {
    #[must_use]
    pub fn new(
        clock: Clock,
        subjects: Arc<dyn SubjectRepository>,
        activity: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            clock,
            subjects,
            activity,
        }
    }

    /// # Errors
    ///
    /// Returns `ReportError::Storage` if the catalog or activity log cannot be
    /// read.
    pub async fn report(&self) -> Result<StudyReport, ReportError> {
        let subjects = self.subjects.list_subjects().await?;
        let week = self.activity.weekly_activity().await?;
        let trend = self.activity.progress_trend().await?;
        let topic_status = StatusBreakdown::from_subjects(&subjects);

        Ok(StudyReport {
            generated_on: self.clock.today(),
            totals: weekly_totals(&week),
            completion_rate: topic_status.completion(),
            week,
            topic_status,
            trend,
            subjects: subjects
                .iter()
                .map(|s| SubjectProgressRow {
                    name: s.name().to_owned(),
                    color: s.color().as_str().to_owned(),
                    topic_count: s.topics().len(),
                    progress: s.progress(),
                })
                .collect(),
        })
    }

    /// Pretty-printed JSON of [`ReportService::report`], for the download
    /// button.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Storage` on read failures or
    /// `ReportError::Serialize` if encoding fails.
    pub async fn export_json(&self) -> Result<String, ReportError> {
        let report = self.report().await?;
        let json = serde_json::to_string_pretty(&report)?;
        tracing::info!(bytes = json.len(), "report exported");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use planner_core::time::fixed_clock;
    use storage::{InMemoryRepository, Storage};

    async fn service() -> ReportService {
        let clock = fixed_clock();
        let repo = InMemoryRepository::seeded(clock.today()).await.unwrap();
        let storage = Storage::from_repository(repo);
        ReportService::new(clock, storage.subjects, storage.activity)
    }

    #[tokio::test]
    async fn report_rolls_up_the_week() {
        let report = service().await.report().await.unwrap();
        assert_eq!(report.totals.hours, 29);
        assert_eq!(report.totals.topics, 23);
        assert!((report.totals.average_hours_per_day - 29.0 / 7.0).abs() < 1e-9);
        assert_eq!(report.week.len(), 7);
        assert_eq!(report.trend.len(), 4);
        assert_eq!(report.subjects.len(), 4);
        assert_eq!(report.topic_status.total(), 16);
        assert_eq!(report.completion_rate, report.topic_status.completion());
    }

    #[tokio::test]
    async fn export_is_valid_json() {
        let json = service().await.export_json().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totals"]["hours"], 29);
        assert_eq!(value["generated_on"], "2023-11-14");
        assert_eq!(value["subjects"][0]["name"], "Mathematics");
        assert_eq!(value["trend"][3]["label"], "W4");
    }
}
