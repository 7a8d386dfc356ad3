//! Shared error types for the services crate.

use thiserror::Error;

use planner_core::model::UserError;
use storage::StorageError;
use storage::mock::SeedError;

use crate::auth::AuthError;

/// Errors emitted by `SessionStore`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no user is signed in")]
    NotAuthenticated,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    User(#[from] UserError),
}

/// Errors emitted by the read-side catalog services
/// (`DashboardService`, `SubjectService`, `ScheduleService`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ReportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialise report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors emitted by the quote pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuoteError {
    #[error("quote pool cannot be empty")]
    EmptyPool,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Seed(#[from] SeedError),
}
