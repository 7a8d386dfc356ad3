mod dashboard_vm;
mod report_vm;
mod schedule_vm;
mod subject_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardVm, StatCardVm, SubjectCountdownVm, UserChipVm, urgency_class};
pub use report_vm::{BarVm, ReportVm, StatusSliceVm, SubjectProgressVm};
pub use schedule_vm::{
    BLOCK_COMPLETION_XP, ScheduleBlockVm, break_duration_options, map_schedule_blocks,
    preferences_form,
};
pub use subject_vm::{
    SubjectCardVm, SubjectDetailVm, SubjectTotalsVm, TopicRowVm, map_subject_cards,
};
pub use time_fmt::{format_average_hours, format_date, format_days_left, format_hours};
