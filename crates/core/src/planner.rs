//! Pure computations behind the dashboard, subject and report views.
//!
//! Nothing in here reads the clock; callers pass `today`/`hour` in so every
//! function is deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    BlockKind, DailyActivity, Progress, ScheduleBlock, Subject, TopicStatus,
};

//
// ─── EXAM COUNTDOWN ────────────────────────────────────────────────────────────
//

/// Whole calendar days from `today` until `exam_date`.
///
/// Zero on exam day and negative once the exam has passed.
#[must_use]
pub fn days_until(exam_date: NaiveDate, today: NaiveDate) -> i64 {
    exam_date.signed_duration_since(today).num_days()
}

/// Subject whose exam is soonest. Ties keep the first subject in list order.
#[must_use]
pub fn nearest_exam(subjects: &[Subject], today: NaiveDate) -> Option<&Subject> {
    subjects.iter().fold(None, |nearest: Option<&Subject>, subject| {
        match nearest {
            Some(current)
                if days_until(current.exam_date(), today)
                    <= days_until(subject.exam_date(), today) =>
            {
                Some(current)
            }
            _ => Some(subject),
        }
    })
}

/// How loudly a countdown badge should shout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamUrgency {
    /// Three days or fewer (including past exams).
    Critical,
    /// Within a week.
    Soon,
    Comfortable,
}

impl ExamUrgency {
    #[must_use]
    pub fn from_days(days: i64) -> Self {
        if days <= 3 {
            Self::Critical
        } else if days <= 7 {
            Self::Soon
        } else {
            Self::Comfortable
        }
    }
}

/// Days at or below which the dashboard shows the pre-exam pep talk.
pub const IMMINENT_EXAM_DAYS: i64 = 5;

#[must_use]
pub fn is_exam_imminent(days: i64) -> bool {
    days <= IMMINENT_EXAM_DAYS
}

//
// ─── TODAY'S PLAN ──────────────────────────────────────────────────────────────
//

/// Hours scheduled for actual work today.
///
/// Sums `end hour - start hour` over every non-break block; minutes are
/// ignored.
#[must_use]
pub fn scheduled_study_hours(blocks: &[ScheduleBlock]) -> u32 {
    blocks
        .iter()
        .filter(|b| !b.kind().is_break())
        .map(ScheduleBlock::whole_hours)
        .sum()
}

/// Number of study and revision blocks in the plan.
#[must_use]
pub fn topics_today(blocks: &[ScheduleBlock]) -> usize {
    blocks
        .iter()
        .filter(|b| matches!(b.kind(), BlockKind::Study | BlockKind::Revision))
        .count()
}

//
// ─── GREETING ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Greeting::Morning => "🌅",
            Greeting::Afternoon => "☀️",
            Greeting::Evening => "🌙",
        }
    }
}

/// Before noon is morning, before 17:00 afternoon, evening after that.
#[must_use]
pub fn greeting_for_hour(hour: u32) -> Greeting {
    match hour {
        0..=11 => Greeting::Morning,
        12..=16 => Greeting::Afternoon,
        _ => Greeting::Evening,
    }
}

pub const FALLBACK_FIRST_NAME: &str = "Learner";

/// First word of a display name, or `Learner` when there is none.
#[must_use]
pub fn first_name(display_name: Option<&str>) -> &str {
    display_name
        .and_then(|name| name.split_whitespace().next())
        .unwrap_or(FALLBACK_FIRST_NAME)
}

//
// ─── AGGREGATES ────────────────────────────────────────────────────────────────
//

/// Topic counts by status across a set of subjects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub new: usize,
    pub learning: usize,
    pub revised: usize,
}

impl StatusBreakdown {
    #[must_use]
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        subjects
            .iter()
            .flat_map(Subject::topics)
            .fold(Self::default(), |mut acc, topic| {
                match topic.status() {
                    TopicStatus::New => acc.new += 1,
                    TopicStatus::Learning => acc.learning += 1,
                    TopicStatus::Revised => acc.revised += 1,
                }
                acc
            })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.new + self.learning + self.revised
    }

    /// Completion across every topic, weighted the same way as a subject's
    /// own progress.
    #[must_use]
    pub fn completion(&self) -> Progress {
        let total = self.total();
        if total == 0 {
            return Progress::ZERO;
        }
        let done = TopicStatus::Revised.completion_weight() * self.revised as f64
            + TopicStatus::Learning.completion_weight() * self.learning as f64;
        Progress::from_ratio(done / total as f64)
    }
}

#[must_use]
pub fn total_revised_topics(subjects: &[Subject]) -> usize {
    subjects
        .iter()
        .map(|s| s.count_with_status(TopicStatus::Revised))
        .sum()
}

#[must_use]
pub fn total_xp_earned(subjects: &[Subject]) -> u64 {
    subjects.iter().map(Subject::xp_earned).sum()
}

/// Weekly roll-up of the activity log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    pub hours: u32,
    pub topics: u32,
    /// Mean over a seven-day week, not over the logged days.
    pub average_hours_per_day: f64,
}

#[must_use]
pub fn weekly_totals(days: &[DailyActivity]) -> WeeklyTotals {
    let hours: u32 = days.iter().map(|d| d.hours).sum();
    let topics: u32 = days.iter().map(|d| d.topics).sum();
    WeeklyTotals {
        hours,
        topics,
        average_hours_per_day: f64::from(hours) / 7.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BlockId, Difficulty, Priority, SubjectColor, SubjectId, Topic, TopicId,
    };
    use chrono::{Duration, Weekday};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn subject_in(id: u64, days: i64) -> Subject {
        Subject::new(
            SubjectId::new(id),
            format!("S{id}"),
            SubjectColor::new("#112233").unwrap(),
            today() + Duration::days(days),
            10 * id,
            Vec::new(),
        )
        .unwrap()
    }

    fn block(id: u64, kind: BlockKind, start: &str, end: &str) -> ScheduleBlock {
        let priority = (!kind.is_break()).then_some(Priority::High);
        ScheduleBlock::parse(BlockId::new(id), kind, start, end, None, None, priority, "")
            .unwrap()
    }

    #[test]
    fn days_until_is_zero_today_and_negative_after() {
        assert_eq!(days_until(today(), today()), 0);
        assert_eq!(days_until(today() - Duration::days(4), today()), -4);
        assert_eq!(days_until(today() + Duration::days(12), today()), 12);
    }

    #[test]
    fn nearest_exam_prefers_first_on_ties() {
        let subjects: Vec<_> = [10, 3, 3, 7]
            .iter()
            .enumerate()
            .map(|(i, d)| subject_in(i as u64 + 1, *d))
            .collect();
        let nearest = nearest_exam(&subjects, today()).unwrap();
        assert_eq!(nearest.id(), SubjectId::new(2));
    }

    #[test]
    fn nearest_exam_handles_past_and_empty() {
        assert!(nearest_exam(&[], today()).is_none());
        let subjects = vec![subject_in(1, 2), subject_in(2, -1)];
        assert_eq!(
            nearest_exam(&subjects, today()).unwrap().id(),
            SubjectId::new(2)
        );
    }

    #[test]
    fn study_hours_skip_breaks() {
        let blocks = vec![
            block(1, BlockKind::Study, "17:00", "19:00"),
            block(2, BlockKind::Break, "19:00", "20:00"),
            block(3, BlockKind::Revision, "20:00", "22:00"),
        ];
        assert_eq!(scheduled_study_hours(&blocks), 4);
        assert_eq!(topics_today(&blocks), 2);
    }

    #[test]
    fn study_hours_truncate_partial_hours() {
        let blocks = vec![
            block(1, BlockKind::Review, "17:45", "18:15"),
            block(2, BlockKind::Study, "18:30", "19:30"),
        ];
        assert_eq!(scheduled_study_hours(&blocks), 2);
        assert_eq!(topics_today(&blocks), 1);
    }

    #[test]
    fn greeting_bands() {
        assert_eq!(greeting_for_hour(0), Greeting::Morning);
        assert_eq!(greeting_for_hour(11), Greeting::Morning);
        assert_eq!(greeting_for_hour(12), Greeting::Afternoon);
        assert_eq!(greeting_for_hour(16), Greeting::Afternoon);
        assert_eq!(greeting_for_hour(17), Greeting::Evening);
        assert_eq!(greeting_for_hour(23), Greeting::Evening);
    }

    #[test]
    fn first_name_falls_back() {
        assert_eq!(first_name(Some("Madhu Sharma")), "Madhu");
        assert_eq!(first_name(Some("   ")), "Learner");
        assert_eq!(first_name(None), "Learner");
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(ExamUrgency::from_days(-2), ExamUrgency::Critical);
        assert_eq!(ExamUrgency::from_days(3), ExamUrgency::Critical);
        assert_eq!(ExamUrgency::from_days(4), ExamUrgency::Soon);
        assert_eq!(ExamUrgency::from_days(7), ExamUrgency::Soon);
        assert_eq!(ExamUrgency::from_days(8), ExamUrgency::Comfortable);
        assert!(is_exam_imminent(5));
        assert!(!is_exam_imminent(6));
    }

    #[test]
    fn breakdown_and_totals() {
        let d = Difficulty::new(3).unwrap();
        let topics = vec![
            Topic::new(TopicId::new(1), "a", TopicStatus::Revised, d).unwrap(),
            Topic::new(TopicId::new(2), "b", TopicStatus::Learning, d).unwrap(),
            Topic::new(TopicId::new(3), "c", TopicStatus::New, d).unwrap(),
        ];
        let s1 = Subject::new(
            SubjectId::new(1),
            "Maths",
            SubjectColor::new("#000000").unwrap(),
            today(),
            300,
            topics.clone(),
        )
        .unwrap();
        let s2 = Subject::new(
            SubjectId::new(2),
            "Biology",
            SubjectColor::new("#ffffff").unwrap(),
            today(),
            150,
            topics[..1].to_vec(),
        )
        .unwrap();
        let subjects = vec![s1, s2];

        let breakdown = StatusBreakdown::from_subjects(&subjects);
        assert_eq!(
            breakdown,
            StatusBreakdown {
                new: 1,
                learning: 1,
                revised: 2
            }
        );
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.completion().percent(), 63);
        assert_eq!(StatusBreakdown::default().completion(), Progress::ZERO);
        assert_eq!(total_revised_topics(&subjects), 2);
        assert_eq!(total_xp_earned(&subjects), 450);
    }

    #[test]
    fn weekly_totals_average_over_seven_days() {
        let days = vec![
            DailyActivity::new(Weekday::Mon, 4, 3),
            DailyActivity::new(Weekday::Tue, 3, 1),
        ];
        let totals = weekly_totals(&days);
        assert_eq!(totals.hours, 7);
        assert_eq!(totals.topics, 4);
        assert!((totals.average_hours_per_day - 1.0).abs() < f64::EPSILON);
    }
}
