use std::sync::Arc;

use chrono::Duration;
use planner_core::model::{Subject, SubjectColor, SubjectId};
use planner_core::time::fixed_now;
use storage::{InMemoryRepository, StorageError, SubjectRepository};

use super::test_harness::{
    ViewKind, setup_signed_out_harness, setup_view_harness, setup_view_harness_with_subject_repo,
};

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_signed_out_harness(ViewKind::Login).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("StudyPlanner"), "missing title in {html}");
    assert!(html.contains("Log in"), "missing login tab in {html}");
    assert!(html.contains("Sign up"), "missing signup tab in {html}");
    assert!(html.contains("Sign in"), "missing submit button in {html}");
    assert!(!html.contains("Name"), "signup-only field shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_greeting_and_stats() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Good evening, Madhu"), "missing greeting in {html}");
    assert!(html.contains("2450 XP"), "missing xp in {html}");
    assert!(html.contains("Level 5"), "missing level in {html}");
    assert!(html.contains("7 Day Streak"), "missing streak in {html}");
    assert!(html.contains("Topics Today"), "missing stat card in {html}");
    assert!(html.contains("5h"), "missing study hours in {html}");
    assert!(html.contains("3d"), "missing next exam in {html}");
    assert!(html.contains("Your exam is approaching!"), "missing banner in {html}");
    assert!(html.contains("Small steps every day."), "missing quote in {html}");
    assert!(html.contains("Operating Systems"), "missing plan preview in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_reflects_xp_awarded_before_render() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    harness.session.add_xp(600).expect("award");
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("3050 XP"), "missing updated xp in {html}");
    assert!(html.contains("Level 7"), "missing updated level in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subjects_view_smoke_renders_cards_and_totals() {
    let mut harness = setup_view_harness(ViewKind::Subjects).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("My Subjects"), "missing heading in {html}");
    for name in ["Mathematics", "Physics", "Chemistry", "Computer Science"] {
        assert!(html.contains(name), "missing {name} in {html}");
    }
    assert!(html.contains("1460"), "missing total xp in {html}");
    assert!(html.contains("3 days left"), "missing countdown in {html}");
    assert!(html.contains("Add Subject"), "missing add card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subject_detail_view_smoke_renders_topics() {
    let mut harness = setup_view_harness(ViewKind::SubjectDetail("1")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Mathematics"), "missing name in {html}");
    assert!(html.contains("Calculus"), "missing topic in {html}");
    assert!(html.contains("AI estimated"), "missing ai badge in {html}");
    assert!(html.contains("AI Scheduling Note"), "missing note in {html}");
    assert!(html.contains("Back to Subjects"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subject_detail_unknown_or_malformed_id_is_not_found() {
    for id in ["99", "abc"] {
        let mut harness = setup_view_harness(ViewKind::SubjectDetail(id)).await;
        harness.settle().await;
        let html = harness.render();
        assert!(html.contains("Subject not found"), "missing not-found for {id} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn schedule_view_smoke_renders_timeline() {
    let mut harness = setup_view_harness(ViewKind::Schedule).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Smart Schedule"), "missing heading in {html}");
    assert!(html.contains("3 topics"), "missing summary in {html}");
    assert!(html.contains("17:00"), "missing start time in {html}");
    assert!(html.contains("Dinner break"), "missing break block in {html}");
    assert!(html.contains("Why this timing?"), "missing reason toggle in {html}");
    assert!(html.contains("Mark complete +50 XP"), "missing complete button in {html}");
    assert!(html.contains("Feeling overwhelmed?"), "missing adjust card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reports_view_smoke_renders_quick_stats() {
    let mut harness = setup_view_harness(ViewKind::Reports).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("29h"), "missing weekly hours in {html}");
    assert!(html.contains("Topics Covered"), "missing topics stat in {html}");
    assert!(html.contains("47%"), "missing completion rate in {html}");
    assert!(html.contains("Weekly Study Hours"), "missing chart in {html}");
    assert!(html.contains("W4"), "missing trend in {html}");
    assert!(html.contains("Download Report"), "missing download button in {html}");
}

struct FailingSubjectRepo;

#[async_trait::async_trait]
impl SubjectRepository for FailingSubjectRepo {
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_subject(&self, _id: SubjectId) -> Result<Option<Subject>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn upsert_subject(&self, _subject: &Subject) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn subjects_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_subject_repo(ViewKind::Subjects, Arc::new(FailingSubjectRepo))
            .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("study data"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reports_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_subject_repo(ViewKind::Reports, Arc::new(FailingSubjectRepo))
            .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("study data"), "missing error in {html}");
}

async fn past_exam_repo() -> Arc<dyn SubjectRepository> {
    let repo = InMemoryRepository::new();
    let subject = Subject::new(
        SubjectId::new(7),
        "History",
        SubjectColor::new("#f59e0b").expect("color"),
        fixed_now().date_naive() - Duration::days(2),
        120,
        Vec::new(),
    )
    .expect("subject");
    repo.upsert_subject(&subject).await.expect("upsert");
    Arc::new(repo)
}

#[tokio::test(flavor = "current_thread")]
async fn past_exam_renders_as_passed_on_subjects_and_dashboard() {
    for view in [ViewKind::Subjects, ViewKind::Dashboard] {
        let mut harness = setup_view_harness_with_subject_repo(view, past_exam_repo().await).await;
        harness.settle().await;
        let html = harness.render();
        assert!(html.contains("History"), "missing subject in {html}");
        assert!(html.contains("Exam passed"), "missing passed label in {html}");
    }
}
