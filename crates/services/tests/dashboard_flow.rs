use planner_core::model::{PlannerSettings, SubjectId};
use planner_core::planner::ExamUrgency;
use planner_core::time::fixed_now;
use services::{AppServices, Clock};

#[tokio::test]
async fn dashboard_subjects_and_report_agree() {
    let app = AppServices::new(PlannerSettings::instant(), Clock::fixed(fixed_now()))
        .await
        .expect("build services");
    let session = app.session();
    session.login("a@b.c", "pw").await.expect("login");

    let snapshot = app
        .dashboard()
        .snapshot(session.current_user().as_ref())
        .await
        .expect("snapshot");
    let cards = app.subjects().list_overview().await.expect("overview");
    let plan = app.schedule().today().await.expect("plan");
    let report = app.reports().report().await.expect("report");

    let next = snapshot.next_exam.expect("next exam");
    let soonest = cards
        .iter()
        .min_by_key(|c| c.days_left)
        .expect("cards");
    assert_eq!(next.subject_id, soonest.id);
    assert_eq!(soonest.urgency, ExamUrgency::Critical);

    assert_eq!(snapshot.study_hours, plan.study_hours);
    assert_eq!(snapshot.topics_today, plan.topics);
    assert_eq!(snapshot.plan_preview[..], plan.blocks[..4]);

    let totals = app.subjects().totals().await.expect("totals");
    assert_eq!(totals.active_subjects, report.subjects.len());
    assert_eq!(totals.topics_revised, report.topic_status.revised);

    let detail = app
        .subjects()
        .detail(next.subject_id)
        .await
        .expect("detail")
        .expect("known subject");
    assert_eq!(detail.days_left, next.days_left);
    assert!(
        app.subjects()
            .detail(SubjectId::new(404))
            .await
            .expect("detail")
            .is_none()
    );
}
