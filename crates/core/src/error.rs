use thiserror::Error;

use crate::model::{
    PlannerSettingsError, ScheduleError, SubjectError, TopicError, UserError,
};

/// Any validation failure raised by the domain model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Subject(#[from] SubjectError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Settings(#[from] PlannerSettingsError),
}
