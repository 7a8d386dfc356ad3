mod activity;
pub mod app_settings;
mod ids;
mod schedule;
mod session;
mod subject;
mod topic;
mod user;

pub use activity::{DailyActivity, ProgressPoint};
pub use app_settings::{PlannerSettings, PlannerSettingsDraft, PlannerSettingsError};
pub use ids::{BlockId, ParseIdError, SubjectId, TopicId, UserId};
pub use schedule::{BlockKind, Priority, ScheduleBlock, ScheduleError, TimeOfDay};
pub use session::{ActiveSession, SessionToken};
pub use subject::{Progress, Subject, SubjectColor, SubjectError};
pub use topic::{Difficulty, Topic, TopicError, TopicStatus};
pub use user::{
    BREAK_DURATION_CHOICES, BadgeId, StudyPreferences, StudyPreferencesDraft, UserError, UserPatch,
    UserRecord,
};
