use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use planner_core::time::fixed_now;
use services::{
    Clock, DashboardService, MockCredentialVerifier, QuotePool, ReportService, ScheduleService,
    SessionStore, SubjectService, UuidTokenIssuer,
};
use storage::{InMemoryRepository, Storage, SubjectRepository};

use crate::context::{UiApp, build_app_context, use_current_user_provider};
use crate::views::{
    DashboardView, LoginView, ReportsView, ScheduleView, SubjectDetailView, SubjectsView,
};

#[derive(Clone)]
struct TestApp {
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardService>,
    subjects: Arc<SubjectService>,
    schedule: Arc<ScheduleService>,
    reports: Arc<ReportService>,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    fn subjects(&self) -> Arc<SubjectService> {
        Arc::clone(&self.subjects)
    }

    fn schedule(&self) -> Arc<ScheduleService> {
        Arc::clone(&self.schedule)
    }

    fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }

    fn quotes(&self) -> QuotePool {
        QuotePool::new(["Small steps every day."]).expect("non-empty pool")
    }

    fn quote_interval(&self) -> Duration {
        Duration::from_secs(30)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Dashboard,
    Subjects,
    SubjectDetail(&'static str),
    Schedule,
    Reports,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_current_user_provider();
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Subjects => rsx! { SubjectsView {} },
        ViewKind::SubjectDetail(id) => rsx! { SubjectDetailView { id: id.to_string() } },
        ViewKind::Schedule => rsx! { ScheduleView {} },
        ViewKind::Reports => rsx! { ReportsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub session: Arc<SessionStore>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Initial render plus enough polling for in-memory resources to resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Signed-in harness over the seeded catalog.
pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    build_harness(view, true, None).await
}

pub async fn setup_signed_out_harness(view: ViewKind) -> ViewHarness {
    build_harness(view, false, None).await
}

pub async fn setup_view_harness_with_subject_repo(
    view: ViewKind,
    subjects: Arc<dyn SubjectRepository>,
) -> ViewHarness {
    build_harness(view, true, Some(subjects)).await
}

async fn build_harness(
    view: ViewKind,
    signed_in: bool,
    subjects_override: Option<Arc<dyn SubjectRepository>>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let repo = InMemoryRepository::seeded(clock.today())
        .await
        .expect("seed catalog");
    let mut storage = Storage::from_repository(repo);
    if let Some(subjects) = subjects_override {
        storage.subjects = subjects;
    }

    let session = Arc::new(SessionStore::new(
        clock,
        Arc::new(MockCredentialVerifier::new(Duration::ZERO)),
        Arc::new(UuidTokenIssuer),
    ));
    if signed_in {
        session
            .login("madhu@example.com", "secret")
            .await
            .expect("login");
    }

    let app = Arc::new(TestApp {
        session: Arc::clone(&session),
        dashboard: Arc::new(DashboardService::new(
            clock,
            3,
            Arc::clone(&storage.subjects),
            Arc::clone(&storage.schedule),
        )),
        subjects: Arc::new(SubjectService::new(clock, Arc::clone(&storage.subjects))),
        schedule: Arc::new(ScheduleService::new(Arc::clone(&storage.schedule))),
        reports: Arc::new(ReportService::new(
            clock,
            Arc::clone(&storage.subjects),
            Arc::clone(&storage.activity),
        )),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, session }
}
