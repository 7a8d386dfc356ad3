use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use planner_core::model::UserRecord;
use services::{
    AppServices, DashboardService, QuotePool, ReportService, ScheduleService, SessionStore,
    SubjectService,
};

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn subjects(&self) -> Arc<SubjectService>;
    fn schedule(&self) -> Arc<ScheduleService>;
    fn reports(&self) -> Arc<ReportService>;
    fn quotes(&self) -> QuotePool;
    fn quote_interval(&self) -> Duration;
}

impl UiApp for AppServices {
    fn session(&self) -> Arc<SessionStore> {
        AppServices::session(self)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        AppServices::dashboard(self)
    }

    fn subjects(&self) -> Arc<SubjectService> {
        AppServices::subjects(self)
    }

    fn schedule(&self) -> Arc<ScheduleService> {
        AppServices::schedule(self)
    }

    fn reports(&self) -> Arc<ReportService> {
        AppServices::reports(self)
    }

    fn quotes(&self) -> QuotePool {
        AppServices::quotes(self).clone()
    }

    fn quote_interval(&self) -> Duration {
        self.settings().quote_interval()
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardService>,
    subjects: Arc<SubjectService>,
    schedule: Arc<ScheduleService>,
    reports: Arc<ReportService>,
    quotes: QuotePool,
    quote_interval: Duration,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            dashboard: app.dashboard(),
            subjects: app.subjects(),
            schedule: app.schedule(),
            reports: app.reports(),
            quotes: app.quotes(),
            quote_interval: app.quote_interval(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn subjects(&self) -> Arc<SubjectService> {
        Arc::clone(&self.subjects)
    }

    #[must_use]
    pub fn schedule(&self) -> Arc<ScheduleService> {
        Arc::clone(&self.schedule)
    }

    #[must_use]
    pub fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }

    #[must_use]
    pub fn quotes(&self) -> &QuotePool {
        &self.quotes
    }

    #[must_use]
    pub fn quote_interval(&self) -> Duration {
        self.quote_interval
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive mirror of the record held by `SessionStore`.
///
/// The store stays the owner; views call [`CurrentUser::refresh`] after every
/// store mutation so signal readers re-render.
#[derive(Clone, Copy)]
pub struct CurrentUser(Signal<Option<UserRecord>>);

impl CurrentUser {
    #[must_use]
    pub fn get(&self) -> Option<UserRecord> {
        (self.0)()
    }

    pub fn refresh(&mut self, session: &SessionStore) {
        self.0.set(session.current_user());
    }
}

/// Provide the `CurrentUser` signal, seeded from the store.
pub fn use_current_user_provider() -> CurrentUser {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| CurrentUser(Signal::new(ctx.session().current_user())))
}

#[must_use]
pub fn use_current_user() -> CurrentUser {
    use_context::<CurrentUser>()
}
