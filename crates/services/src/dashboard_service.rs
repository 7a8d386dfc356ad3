use std::sync::Arc;

use planner_core::gamification::LevelProgress;
use planner_core::model::{Progress, ScheduleBlock, Subject, SubjectColor, SubjectId, UserRecord};
use planner_core::planner::{
    ExamUrgency, Greeting, days_until, first_name, greeting_for_hour, is_exam_imminent,
    nearest_exam, scheduled_study_hours, topics_today,
};
use storage::{ScheduleRepository, SubjectRepository};

use crate::Clock;
use crate::error::CatalogError;

/// Number of schedule blocks shown in the "Today's Plan" card.
pub const PLAN_PREVIEW_LEN: usize = 4;

/// Countdown row for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamCountdown {
    pub subject_id: SubjectId,
    pub name: String,
    pub color: SubjectColor,
    pub days_left: i64,
    pub urgency: ExamUrgency,
    pub imminent: bool,
    pub progress: Progress,
}

impl ExamCountdown {
    fn for_subject(subject: &Subject, today: chrono::NaiveDate) -> Self {
        let days_left = days_until(subject.exam_date(), today);
        Self {
            subject_id: subject.id(),
            name: subject.name().to_owned(),
            color: subject.color().clone(),
            days_left,
            urgency: ExamUrgency::from_days(days_left),
            imminent: is_exam_imminent(days_left),
            progress: subject.progress(),
        }
    }
}

/// Everything the dashboard renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub greeting: Greeting,
    pub first_name: String,
    pub xp: u64,
    pub level: LevelProgress,
    pub streak: u32,
    pub topics_today: usize,
    pub study_hours: u32,
    pub revisions_due: u32,
    pub next_exam: Option<ExamCountdown>,
    pub plan_preview: Vec<ScheduleBlock>,
    pub subjects: Vec<ExamCountdown>,
}

impl DashboardSnapshot {
    /// Whether the pre-exam banner should show.
    #[must_use]
    pub fn show_exam_banner(&self) -> bool {
        self.next_exam.as_ref().is_some_and(|exam| exam.imminent)
    }
}

#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    revisions_due: u32,
    subjects: Arc<dyn SubjectRepository>,
    schedule: Arc<dyn ScheduleRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        clock: Clock,
        revisions_due: u32,
        subjects: Arc<dyn SubjectRepository>,
        schedule: Arc<dyn ScheduleRepository>,
    ) -> Self {
        Self {
            clock,
            revisions_due,
            subjects,
            schedule,
        }
    }

    /// Build the dashboard for `user`, or for an anonymous learner with no XP.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the catalog cannot be read.
    pub async fn snapshot(
        &self,
        user: Option<&UserRecord>,
    ) -> Result<DashboardSnapshot, CatalogError> {
        let today = self.clock.today();
        let subjects = self.subjects.list_subjects().await?;
        let blocks = self.schedule.today_schedule().await?;

        let xp = user.map_or(0, UserRecord::xp);
        let next_exam =
            nearest_exam(&subjects, today).map(|s| ExamCountdown::for_subject(s, today));

        Ok(DashboardSnapshot {
            greeting: greeting_for_hour(self.clock.hour_of_day()),
            first_name: first_name(user.map(UserRecord::name)).to_owned(),
            xp,
            level: LevelProgress::for_xp(xp),
            streak: user.map_or(0, UserRecord::streak),
            topics_today: topics_today(&blocks),
            study_hours: scheduled_study_hours(&blocks),
            revisions_due: self.revisions_due,
            next_exam,
            plan_preview: blocks.iter().take(PLAN_PREVIEW_LEN).cloned().collect(),
            subjects: subjects
                .iter()
                .map(|s| ExamCountdown::for_subject(s, today))
                .collect(),
        })
    }
}
