use std::sync::Arc;

use planner_core::model::ScheduleBlock;
use planner_core::planner::{scheduled_study_hours, topics_today};
use storage::ScheduleRepository;

use crate::error::CatalogError;

/// Today's timeline plus the figures shown above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub blocks: Vec<ScheduleBlock>,
    pub study_hours: u32,
    pub topics: usize,
}

#[derive(Clone)]
pub struct ScheduleService {
    schedule: Arc<dyn ScheduleRepository>,
}

impl ScheduleService {
    #[must_use]
    pub fn new(schedule: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedule }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the schedule cannot be read.
    pub async fn today(&self) -> Result<DayPlan, CatalogError> {
        let blocks = self.schedule.today_schedule().await?;
        Ok(DayPlan {
            study_hours: scheduled_study_hours(&blocks),
            topics: topics_today(&blocks),
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use planner_core::model::BlockKind;
    use storage::{InMemoryRepository, Storage};

    #[tokio::test]
    async fn today_returns_timeline_in_start_order() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let repo = InMemoryRepository::seeded(today).await.unwrap();
        let service = ScheduleService::new(Storage::from_repository(repo).schedule);

        let plan = service.today().await.unwrap();
        assert_eq!(plan.blocks.len(), 5);
        assert!(plan.blocks.windows(2).all(|w| w[0].start() < w[1].start()));
        assert_eq!(plan.study_hours, 5);
        assert_eq!(plan.topics, 3);
        assert_eq!(
            plan.blocks.iter().filter(|b| b.kind() == BlockKind::Break).count(),
            1
        );
    }

    #[tokio::test]
    async fn empty_schedule_is_an_empty_plan() {
        let service = ScheduleService::new(Storage::in_memory().schedule);
        let plan = service.today().await.unwrap();
        assert!(plan.blocks.is_empty());
        assert_eq!(plan.study_hours, 0);
    }
}
