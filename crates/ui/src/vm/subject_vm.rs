use planner_core::model::{Topic, TopicStatus};
use services::{SubjectCard, SubjectDetail, SubjectTotals};

use crate::vm::dashboard_vm::urgency_class;
use crate::vm::time_fmt::{format_date, format_days_left};

/// Circumference of the progress ring (r = 28).
const RING_CIRCUMFERENCE: f64 = 176.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub id: String,
    pub name: String,
    pub color: String,
    pub summary: String,
    pub days_label: String,
    pub badge_class: &'static str,
    pub progress: u8,
    pub ring_dash: String,
    pub exam_label: String,
    pub xp_label: String,
    pub topic_dots: Vec<&'static str>,
}

impl From<&SubjectCard> for SubjectCardVm {
    fn from(card: &SubjectCard) -> Self {
        let progress = card.progress.percent();
        let dash = f64::from(progress) / 100.0 * RING_CIRCUMFERENCE;
        Self {
            id: card.id.to_string(),
            name: card.name.clone(),
            color: card.color.as_str().to_owned(),
            summary: format!(
                "{} topics • {} completed",
                card.topic_count, card.revised_count
            ),
            days_label: format_days_left(card.days_left),
            badge_class: urgency_class(card.urgency),
            progress,
            ring_dash: format!("{dash:.1} {RING_CIRCUMFERENCE}"),
            exam_label: format!("Exam: {}", format_date(card.exam_date)),
            xp_label: format!("{} XP", card.xp_earned),
            topic_dots: card.topic_statuses.iter().copied().map(status_dot).collect(),
        }
    }
}

#[must_use]
pub fn map_subject_cards(cards: &[SubjectCard]) -> Vec<SubjectCardVm> {
    cards.iter().map(SubjectCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectTotalsVm {
    pub active: String,
    pub revised: String,
    pub xp: String,
}

impl From<SubjectTotals> for SubjectTotalsVm {
    fn from(totals: SubjectTotals) -> Self {
        Self {
            active: totals.active_subjects.to_string(),
            revised: totals.topics_revised.to_string(),
            xp: totals.total_xp.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicRowVm {
    pub id: u64,
    pub name: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub dot_class: &'static str,
    /// Five flags, `true` for a filled star.
    pub stars: [bool; 5],
    pub last_studied: Option<String>,
    pub ai_estimated: bool,
}

impl From<&Topic> for TopicRowVm {
    fn from(topic: &Topic) -> Self {
        let difficulty = topic.difficulty().value();
        let mut stars = [false; 5];
        for (i, star) in stars.iter_mut().enumerate() {
            *star = i < usize::from(difficulty);
        }
        Self {
            id: topic.id().value(),
            name: topic.name().to_owned(),
            status_label: topic.status().label(),
            status_class: status_class(topic.status()),
            dot_class: status_dot(topic.status()),
            stars,
            last_studied: topic
                .last_studied()
                .map(|d| format!("Last studied: {}", format_date(d))),
            ai_estimated: topic.is_ai_estimated(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectDetailVm {
    pub name: String,
    pub color: String,
    pub summary: String,
    pub days_left: String,
    pub revised: String,
    pub xp_earned: String,
    pub in_progress: String,
    pub progress: u8,
    pub topics: Vec<TopicRowVm>,
}

impl From<&SubjectDetail> for SubjectDetailVm {
    fn from(detail: &SubjectDetail) -> Self {
        let subject = &detail.subject;
        let progress = subject.progress().percent();
        Self {
            name: subject.name().to_owned(),
            color: subject.color().as_str().to_owned(),
            summary: format!("{} topics • {progress}% complete", subject.topics().len()),
            days_left: detail.days_left.to_string(),
            revised: detail.revised_count.to_string(),
            xp_earned: subject.xp_earned().to_string(),
            in_progress: detail.learning_count.to_string(),
            progress,
            topics: subject.topics().iter().map(TopicRowVm::from).collect(),
        }
    }
}

fn status_class(status: TopicStatus) -> &'static str {
    match status {
        TopicStatus::New => "badge badge--info",
        TopicStatus::Learning => "badge badge--warning",
        TopicStatus::Revised => "badge badge--success",
    }
}

fn status_dot(status: TopicStatus) -> &'static str {
    match status {
        TopicStatus::New => "dot dot--new",
        TopicStatus::Learning => "dot dot--learning",
        TopicStatus::Revised => "dot dot--revised",
    }
}
