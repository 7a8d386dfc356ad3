use planner_core::model::{
    BREAK_DURATION_CHOICES, BlockKind, Priority, ScheduleBlock, StudyPreferences,
    StudyPreferencesDraft,
};

use crate::vm::time_fmt::format_time_range;

/// XP awarded for ticking off a non-break block.
pub const BLOCK_COMPLETION_XP: u64 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleBlockVm {
    pub id: u64,
    pub kind_class: &'static str,
    pub start: String,
    pub end: String,
    pub time_range: String,
    pub title: String,
    pub subject: Option<String>,
    pub priority: Option<&'static str>,
    pub priority_class: &'static str,
    pub reason: Option<String>,
    pub completable: bool,
}

impl From<&ScheduleBlock> for ScheduleBlockVm {
    fn from(block: &ScheduleBlock) -> Self {
        let kind = block.kind();
        let title = block
            .topic_name()
            .map_or_else(|| kind_title(kind).to_string(), str::to_owned);
        Self {
            id: block.id().value(),
            kind_class: kind_class(kind),
            start: block.start().to_string(),
            end: block.end().to_string(),
            time_range: format_time_range(block.start(), block.end()),
            title,
            subject: block.subject_name().map(str::to_owned),
            priority: block.priority().map(Priority::label),
            priority_class: block.priority().map_or("", priority_class),
            reason: (!kind.is_break() && !block.reason().is_empty())
                .then(|| block.reason().to_owned()),
            completable: !kind.is_break(),
        }
    }
}

#[must_use]
pub fn map_schedule_blocks(blocks: &[ScheduleBlock]) -> Vec<ScheduleBlockVm> {
    blocks.iter().map(ScheduleBlockVm::from).collect()
}

fn kind_class(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Study => "block block--study",
        BlockKind::Revision => "block block--revision",
        BlockKind::Break => "block block--break",
        BlockKind::Review => "block block--review",
    }
}

fn kind_title(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Study => "Study",
        BlockKind::Revision => "Revision",
        BlockKind::Break => "Break",
        BlockKind::Review => "Review",
    }
}

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "badge badge--urgent",
        Priority::Medium => "badge badge--warning",
        Priority::Low => "badge badge--muted",
    }
}

/// `(value, label)` pairs for the break-duration select.
#[must_use]
pub fn break_duration_options() -> Vec<(String, String)> {
    BREAK_DURATION_CHOICES
        .iter()
        .map(|m| (m.to_string(), format!("{m} minutes")))
        .collect()
}

/// Form state for the preferences panel, seeded from the user's saved values.
#[must_use]
pub fn preferences_form(saved: Option<&StudyPreferences>) -> StudyPreferencesDraft {
    saved.map_or_else(StudyPreferencesDraft::default, StudyPreferencesDraft::from_preferences)
}
