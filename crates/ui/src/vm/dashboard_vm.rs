use planner_core::model::UserRecord;
use planner_core::planner::ExamUrgency;
use services::{DashboardSnapshot, ExamCountdown};

use crate::vm::schedule_vm::{ScheduleBlockVm, map_schedule_blocks};
use crate::vm::time_fmt::format_hours;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCardVm {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
    pub tone: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCountdownVm {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub days_label: String,
    pub badge_class: &'static str,
    pub progress: u8,
}

impl From<&ExamCountdown> for SubjectCountdownVm {
    fn from(countdown: &ExamCountdown) -> Self {
        Self {
            id: countdown.subject_id.value(),
            name: countdown.name.clone(),
            color: countdown.color.as_str().to_owned(),
            days_label: short_days_left(countdown.days_left),
            badge_class: if countdown.imminent {
                "badge badge--urgent"
            } else {
                "badge badge--muted"
            },
            progress: countdown.progress.percent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub heading: String,
    pub xp_label: String,
    pub level_label: String,
    pub streak_label: String,
    pub level_percent: u8,
    pub stats: Vec<StatCardVm>,
    pub insight: Option<String>,
    pub plan_preview: Vec<ScheduleBlockVm>,
    pub subjects: Vec<SubjectCountdownVm>,
    pub show_exam_banner: bool,
}

impl DashboardVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let (next_value, next_subtitle) = snapshot.next_exam.as_ref().map_or_else(
            || ("-".to_string(), "No exams scheduled".to_string()),
            |exam| {
                let value = if exam.days_left < 0 {
                    "Passed".to_string()
                } else {
                    format!("{}d", exam.days_left)
                };
                (value, exam.name.clone())
            },
        );

        let stats = vec![
            StatCardVm {
                title: "Topics Today",
                value: snapshot.topics_today.to_string(),
                subtitle: "to complete".to_string(),
                tone: "info",
            },
            StatCardVm {
                title: "Study Hours",
                value: format_hours(snapshot.study_hours),
                subtitle: "scheduled".to_string(),
                tone: "success",
            },
            StatCardVm {
                title: "Revisions Due",
                value: snapshot.revisions_due.to_string(),
                subtitle: "this week".to_string(),
                tone: "warning",
            },
            StatCardVm {
                title: "Next Exam",
                value: next_value,
                subtitle: next_subtitle,
                tone: "urgent",
            },
        ];

        let insight = snapshot.next_exam.as_ref().map(|exam| {
            if exam.days_left < 0 {
                format!(
                    "Your {} exam date has passed. Review today's plan to focus on what's next.",
                    exam.name
                )
            } else {
                format!(
                    "You're {} days away from your {} exam. Completing 2 more topics today keeps you ahead of schedule.",
                    exam.days_left, exam.name
                )
            }
        });

        Self {
            heading: format!(
                "{}, {} {}",
                snapshot.greeting.text(),
                snapshot.first_name,
                snapshot.greeting.emoji()
            ),
            xp_label: format!("{} XP", snapshot.xp),
            level_label: format!("Level {}", snapshot.level.level),
            streak_label: format!("{} Day Streak", snapshot.streak),
            level_percent: snapshot.level.percent(),
            stats,
            insight,
            plan_preview: map_schedule_blocks(&snapshot.plan_preview),
            subjects: snapshot
                .subjects
                .iter()
                .map(SubjectCountdownVm::from)
                .collect(),
            show_exam_banner: snapshot.show_exam_banner(),
        }
    }
}

/// Badges shown in the sidebar for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserChipVm {
    pub name: String,
    pub xp_label: String,
    pub level_label: String,
    pub streak_label: String,
}

impl UserChipVm {
    #[must_use]
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            name: user.name().to_owned(),
            xp_label: format!("{} XP", user.xp()),
            level_label: format!("Level {}", user.level()),
            streak_label: format!("{} Day Streak", user.streak()),
        }
    }
}

fn short_days_left(days: i64) -> String {
    if days < 0 {
        "Exam passed".to_string()
    } else {
        format!("{days}d left")
    }
}

/// CSS modifier for an urgency badge.
#[must_use]
pub fn urgency_class(urgency: ExamUrgency) -> &'static str {
    match urgency {
        ExamUrgency::Critical => "badge badge--urgent badge--pulse",
        ExamUrgency::Soon => "badge badge--warning",
        ExamUrgency::Comfortable => "badge badge--outline",
    }
}
