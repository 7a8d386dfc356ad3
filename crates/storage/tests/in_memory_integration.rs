use chrono::{Duration, NaiveDate};
use planner_core::model::{SubjectId, TopicStatus};
use planner_core::planner::days_until;
use storage::mock::MockCatalog;
use storage::{InMemoryRepository, Storage};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

#[tokio::test]
async fn storage_bundle_shares_one_catalog() {
    let repo = InMemoryRepository::seeded(today()).await.expect("seed");
    let storage = Storage::from_repository(repo.clone());

    let subjects = storage.subjects.list_subjects().await.unwrap();
    let countdowns: Vec<i64> = subjects
        .iter()
        .map(|s| days_until(s.exam_date(), today()))
        .collect();
    assert_eq!(countdowns, vec![12, 5, 20, 3]);

    let schedule = storage.schedule.today_schedule().await.unwrap();
    assert!(schedule.windows(2).all(|w| w[0].end() <= w[1].start()));

    let week = storage.activity.weekly_activity().await.unwrap();
    assert_eq!(week.iter().map(|d| d.hours).sum::<u32>(), 29);
}

#[tokio::test]
async fn seeding_a_second_time_replaces_rather_than_duplicates() {
    let repo = InMemoryRepository::new();
    MockCatalog::build(today())
        .unwrap()
        .install(&repo)
        .await
        .unwrap();
    MockCatalog::build(today() + Duration::days(1))
        .unwrap()
        .install(&repo)
        .await
        .unwrap();

    let storage = Storage::from_repository(repo);
    let subjects = storage.subjects.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 4);

    let maths = storage
        .subjects
        .get_subject(SubjectId::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(maths.exam_date(), today() + Duration::days(13));
    assert_eq!(maths.count_with_status(TopicStatus::Revised), 1);
}

#[tokio::test]
async fn empty_storage_reads_are_empty_not_errors() {
    let storage = Storage::in_memory();
    assert!(storage.subjects.list_subjects().await.unwrap().is_empty());
    assert!(storage.schedule.today_schedule().await.unwrap().is_empty());
    assert!(storage.activity.progress_trend().await.unwrap().is_empty());
}
