#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod dashboard_service;
pub mod error;
pub mod quotes;
pub mod report_service;
pub mod schedule_service;
pub mod session_store;
pub mod subject_service;

pub use planner_core::Clock;

pub use app_services::AppServices;
pub use auth::{AuthError, CredentialVerifier, MockCredentialVerifier, TokenIssuer, UuidTokenIssuer};
pub use dashboard_service::{DashboardService, DashboardSnapshot, ExamCountdown, PLAN_PREVIEW_LEN};
pub use error::{AppServicesError, CatalogError, QuoteError, ReportError, SessionError};
pub use quotes::{QuotePool, QuoteRotation};
pub use report_service::{ReportService, StudyReport, SubjectProgressRow};
pub use schedule_service::{DayPlan, ScheduleService};
pub use session_store::{SessionStore, XpGain};
pub use subject_service::{SubjectCard, SubjectDetail, SubjectService, SubjectTotals};
