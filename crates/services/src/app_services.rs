use std::sync::Arc;

use planner_core::model::PlannerSettings;
use storage::{InMemoryRepository, Storage};

use crate::Clock;
use crate::auth::{MockCredentialVerifier, UuidTokenIssuer};
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::quotes::QuotePool;
use crate::report_service::ReportService;
use crate::schedule_service::ScheduleService;
use crate::session_store::SessionStore;
use crate::subject_service::SubjectService;

/// Assembles the session store and the app-facing services.
#[derive(Clone)]
pub struct AppServices {
    settings: PlannerSettings,
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardService>,
    subjects: Arc<SubjectService>,
    schedule: Arc<ScheduleService>,
    reports: Arc<ReportService>,
    quotes: QuotePool,
}

impl AppServices {
    /// Build services over a freshly seeded in-memory catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Seed` if the mock dataset fails to build.
    pub async fn new(settings: PlannerSettings, clock: Clock) -> Result<Self, AppServicesError> {
        let repo = InMemoryRepository::seeded(clock.today()).await?;
        let storage = Storage::from_repository(repo);

        let session = Arc::new(SessionStore::new(
            clock,
            Arc::new(MockCredentialVerifier::new(settings.auth_delay())),
            Arc::new(UuidTokenIssuer),
        ));
        let dashboard = Arc::new(DashboardService::new(
            clock,
            settings.revisions_due(),
            Arc::clone(&storage.subjects),
            Arc::clone(&storage.schedule),
        ));
        let subjects = Arc::new(SubjectService::new(clock, Arc::clone(&storage.subjects)));
        let schedule = Arc::new(ScheduleService::new(Arc::clone(&storage.schedule)));
        let reports = Arc::new(ReportService::new(
            clock,
            Arc::clone(&storage.subjects),
            Arc::clone(&storage.activity),
        ));

        tracing::debug!(
            auth_delay_ms = settings.auth_delay().as_millis(),
            quote_interval_secs = settings.quote_interval().as_secs(),
            "app services ready"
        );

        Ok(Self {
            settings,
            session,
            dashboard,
            subjects,
            schedule,
            reports,
            quotes: QuotePool::builtin(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
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
}
