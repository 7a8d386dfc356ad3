use std::sync::Arc;

use chrono::NaiveDate;
use planner_core::model::{Progress, Subject, SubjectColor, SubjectId, TopicStatus};
use planner_core::planner::{ExamUrgency, days_until, total_revised_topics, total_xp_earned};
use storage::SubjectRepository;

use crate::Clock;
use crate::error::CatalogError;

/// One card on the subjects grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCard {
    pub id: SubjectId,
    pub name: String,
    pub color: SubjectColor,
    pub exam_date: NaiveDate,
    pub days_left: i64,
    pub urgency: ExamUrgency,
    pub topic_count: usize,
    pub revised_count: usize,
    pub xp_earned: u64,
    pub progress: Progress,
    /// Status of each topic in list order, for the status dots.
    pub topic_statuses: Vec<TopicStatus>,
}

/// Header figures above the subjects grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectTotals {
    pub active_subjects: usize,
    pub topics_revised: usize,
    pub total_xp: u64,
}

/// A single subject with its derived counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub days_left: i64,
    pub urgency: ExamUrgency,
    pub revised_count: usize,
    pub learning_count: usize,
}

#[derive(Clone)]
pub struct SubjectService {
    clock: Clock,
    subjects: Arc<dyn SubjectRepository>,
}

impl SubjectService {
    #[must_use]
    pub fn new(clock: Clock, subjects: Arc<dyn SubjectRepository>) -> Self {
        Self { clock, subjects }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the catalog cannot be read.
    pub async fn list_overview(&self) -> Result<Vec<SubjectCard>, CatalogError> {
        let today = self.clock.today();
        let subjects = self.subjects.list_subjects().await?;
        Ok(subjects.iter().map(|s| card(s, today)).collect())
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the catalog cannot be read.
    pub async fn totals(&self) -> Result<SubjectTotals, CatalogError> {
        let subjects = self.subjects.list_subjects().await?;
        Ok(SubjectTotals {
            active_subjects: subjects.len(),
            topics_revised: total_revised_topics(&subjects),
            total_xp: total_xp_earned(&subjects),
        })
    }

    /// Look up one subject. `Ok(None)` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the catalog cannot be read.
    pub async fn detail(&self, id: SubjectId) -> Result<Option<SubjectDetail>, CatalogError> {
        let Some(subject) = self.subjects.get_subject(id).await? else {
            tracing::debug!(subject_id = %id, "subject not found");
            return Ok(None);
        };
        let days_left = days_until(subject.exam_date(), self.clock.today());
        Ok(Some(SubjectDetail {
            days_left,
            urgency: ExamUrgency::from_days(days_left),
            revised_count: subject.count_with_status(TopicStatus::Revised),
            learning_count: subject.count_with_status(TopicStatus::Learning),
            subject,
        }))
    }
}

fn card(subject: &Subject, today: NaiveDate) -> SubjectCard {
    let days_left = days_until(subject.exam_date(), today);
    SubjectCard {
        id: subject.id(),
        name: subject.name().to_owned(),
        color: subject.color().clone(),
        exam_date: subject.exam_date(),
        days_left,
        urgency: ExamUrgency::from_days(days_left),
        topic_count: subject.topics().len(),
        revised_count: subject.count_with_status(TopicStatus::Revised),
        xp_earned: subject.xp_earned(),
        progress: subject.progress(),
        topic_statuses: subject.topics().iter().map(|t| t.status()).collect(),
    }
}
