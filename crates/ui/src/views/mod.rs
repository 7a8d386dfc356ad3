mod dashboard;
mod login;
mod reports;
mod schedule;
mod state;
mod subject_detail;
mod subjects;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use login::LoginView;
pub use reports::ReportsView;
pub use schedule::ScheduleView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use subject_detail::SubjectDetailView;
pub use subjects::SubjectsView;
