use async_trait::async_trait;
use planner_core::model::{DailyActivity, ProgressPoint, ScheduleBlock, Subject, SubjectId};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Read/write access to the subject catalog.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// All subjects in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError>;

    /// Fetch a subject by ID. `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn get_subject(&self, id: SubjectId) -> Result<Option<Subject>, StorageError>;

    /// Insert a subject, or replace the one with the same ID in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be written.
    async fn upsert_subject(&self, subject: &Subject) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Today's blocks ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the schedule cannot be read.
    async fn today_schedule(&self) -> Result<Vec<ScheduleBlock>, StorageError>;

    /// Replace today's plan wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if two blocks overlap, or other
    /// storage errors.
    async fn replace_schedule(&self, blocks: Vec<ScheduleBlock>) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the activity log cannot be read.
    async fn weekly_activity(&self) -> Result<Vec<DailyActivity>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the trend cannot be read.
    async fn progress_trend(&self) -> Result<Vec<ProgressPoint>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be written.
    async fn record_activity(
        &self,
        week: Vec<DailyActivity>,
        trend: Vec<ProgressPoint>,
    ) -> Result<(), StorageError>;
}

#[derive(Default)]
struct Catalog {
    subjects: Vec<Subject>,
    schedule: Vec<ScheduleBlock>,
    week: Vec<DailyActivity>,
    trend: Vec<ProgressPoint>,
}

/// Process-local repository; the only backend the planner ships with.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<Catalog>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalog>, StorageError> {
        self.catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl SubjectRepository for InMemoryRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        Ok(self.lock()?.subjects.clone())
    }

    async fn get_subject(&self, id: SubjectId) -> Result<Option<Subject>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.subjects.iter().find(|s| s.id() == id).cloned())
    }

    async fn upsert_subject(&self, subject: &Subject) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        match guard.subjects.iter_mut().find(|s| s.id() == subject.id()) {
            Some(existing) => *existing = subject.clone(),
            None => guard.subjects.push(subject.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryRepository {
    async fn today_schedule(&self) -> Result<Vec<ScheduleBlock>, StorageError> {
        Ok(self.lock()?.schedule.clone())
    }

    async fn replace_schedule(&self, mut blocks: Vec<ScheduleBlock>) -> Result<(), StorageError> {
        blocks.sort_by_key(ScheduleBlock::start);
        if blocks.windows(2).any(|pair| pair[1].start() < pair[0].end()) {
            return Err(StorageError::Conflict);
        }
        self.lock()?.schedule = blocks;
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for InMemoryRepository {
    async fn weekly_activity(&self) -> Result<Vec<DailyActivity>, StorageError> {
        Ok(self.lock()?.week.clone())
    }

    async fn progress_trend(&self) -> Result<Vec<ProgressPoint>, StorageError> {
        Ok(self.lock()?.trend.clone())
    }

    async fn record_activity(
        &self,
        week: Vec<DailyActivity>,
        trend: Vec<ProgressPoint>,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.week = week;
        guard.trend = trend;
        Ok(())
    }
}

/// Aggregates the catalog repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub subjects: Arc<dyn SubjectRepository>,
    pub schedule: Arc<dyn ScheduleRepository>,
    pub activity: Arc<dyn ActivityRepository>,
}

impl Storage {
    /// Empty in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let subjects: Arc<dyn SubjectRepository> = Arc::new(repo.clone());
        let schedule: Arc<dyn ScheduleRepository> = Arc::new(repo.clone());
        let activity: Arc<dyn ActivityRepository> = Arc::new(repo);
        Self {
            subjects,
            schedule,
            activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use planner_core::model::{BlockId, BlockKind, Priority, SubjectColor};

    fn subject(id: u64, name: &str) -> Subject {
        Subject::new(
            SubjectId::new(id),
            name,
            SubjectColor::new("#123456").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            0,
            Vec::new(),
        )
        .unwrap()
    }

    fn block(id: u64, start: &str, end: &str) -> ScheduleBlock {
        ScheduleBlock::parse(
            BlockId::new(id),
            BlockKind::Study,
            start,
            end,
            None,
            None,
            Some(Priority::Low),
            "",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_replaces_in_place_and_keeps_order() {
        let repo = InMemoryRepository::new();
        repo.upsert_subject(&subject(1, "Maths")).await.unwrap();
        repo.upsert_subject(&subject(2, "Physics")).await.unwrap();
        repo.upsert_subject(&subject(1, "Further Maths")).await.unwrap();

        let names: Vec<_> = repo
            .list_subjects()
            .await
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["Further Maths", "Physics"]);
    }

    #[tokio::test]
    async fn missing_subject_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_subject(SubjectId::new(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_schedule_sorts_and_rejects_overlap() {
        let repo = InMemoryRepository::new();
        repo.replace_schedule(vec![block(2, "19:00", "20:00"), block(1, "17:00", "19:00")])
            .await
            .unwrap();
        let ids: Vec<_> = repo
            .today_schedule()
            .await
            .unwrap()
            .iter()
            .map(|b| b.id().value())
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let err = repo
            .replace_schedule(vec![block(1, "17:00", "19:00"), block(2, "18:30", "20:00")])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
        assert_eq!(repo.today_schedule().await.unwrap().len(), 2);
    }
}
