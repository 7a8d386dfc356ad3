//! The fixed demo dataset the planner runs on.
//!
//! Exam and last-studied dates are laid out relative to `today` so the
//! countdowns stay meaningful whenever the app is launched.

use chrono::{Duration, NaiveDate, Weekday};
use planner_core::model::{
    BlockId, BlockKind, DailyActivity, Difficulty, Priority, Progress, ProgressPoint,
    ScheduleBlock, Subject, SubjectColor, SubjectId, Topic, TopicId, TopicStatus,
};

use crate::repository::{
    ActivityRepository, InMemoryRepository, ScheduleRepository, StorageError, SubjectRepository,
};

/// Everything the demo needs, already validated.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    pub subjects: Vec<Subject>,
    pub schedule: Vec<ScheduleBlock>,
    pub week: Vec<DailyActivity>,
    pub trend: Vec<ProgressPoint>,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Model(#[from] planner_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

struct TopicSeed {
    name: &'static str,
    status: TopicStatus,
    difficulty: u8,
    studied_days_ago: Option<i64>,
    ai_estimated: bool,
}

const fn seed(
    name: &'static str,
    status: TopicStatus,
    difficulty: u8,
    studied_days_ago: Option<i64>,
    ai_estimated: bool,
) -> TopicSeed {
    TopicSeed {
        name,
        status,
        difficulty,
        studied_days_ago,
        ai_estimated,
    }
}

struct SubjectSeed {
    name: &'static str,
    color: &'static str,
    exam_in_days: i64,
    xp_earned: u64,
    topics: &'static [TopicSeed],
}

use TopicStatus::{Learning, New, Revised};

const SUBJECTS: &[SubjectSeed] = &[
    SubjectSeed {
        name: "Mathematics",
        color: "#6366f1",
        exam_in_days: 12,
        xp_earned: 450,
        topics: &[
            seed("Calculus", Revised, 4, Some(2), false),
            seed("Linear Algebra", Learning, 3, Some(1), true),
            seed("Probability", New, 3, None, false),
            seed("Differential Equations", New, 5, None, true),
        ],
    },
    SubjectSeed {
        name: "Physics",
        color: "#3b82f6",
        exam_in_days: 5,
        xp_earned: 320,
        topics: &[
            seed("Kinematics", Revised, 2, Some(4), false),
            seed("Thermodynamics", Learning, 4, Some(1), false),
            seed("Electromagnetism", New, 5, None, true),
            seed("Optics", Revised, 3, Some(6), false),
        ],
    },
    SubjectSeed {
        name: "Chemistry",
        color: "#10b981",
        exam_in_days: 20,
        xp_earned: 180,
        topics: &[
            seed("Organic Chemistry", Learning, 5, Some(3), true),
            seed("Periodic Table", Revised, 1, Some(8), false),
            seed("Chemical Bonding", Learning, 3, Some(2), false),
            seed("Stoichiometry", New, 2, None, true),
        ],
    },
    SubjectSeed {
        name: "Computer Science",
        color: "#f59e0b",
        exam_in_days: 3,
        xp_earned: 510,
        topics: &[
            seed("Data Structures", Revised, 3, Some(1), false),
            seed("Algorithms", Learning, 4, Some(0), false),
            seed("Operating Systems", New, 4, None, true),
            seed("Computer Networks", New, 3, None, false),
        ],
    },
];

struct BlockSeed {
    kind: BlockKind,
    start: &'static str,
    end: &'static str,
    subject: Option<&'static str>,
    topic: Option<&'static str>,
    priority: Option<Priority>,
    reason: &'static str,
}

const SCHEDULE: &[BlockSeed] = &[
    BlockSeed {
        kind: BlockKind::Study,
        start: "17:00",
        end: "18:00",
        subject: Some("Computer Science"),
        topic: Some("Operating Systems"),
        priority: Some(Priority::High),
        reason: "Exam in three days and nothing covered yet, so it takes your freshest hour.",
    },
    BlockSeed {
        kind: BlockKind::Revision,
        start: "18:00",
        end: "19:00",
        subject: Some("Physics"),
        topic: Some("Thermodynamics"),
        priority: Some(Priority::Medium),
        reason: "Studied yesterday; revising within a day locks it in.",
    },
    BlockSeed {
        kind: BlockKind::Break,
        start: "19:00",
        end: "19:30",
        subject: None,
        topic: Some("Dinner break"),
        priority: None,
        reason: "Step away from the desk before the long block.",
    },
    BlockSeed {
        kind: BlockKind::Study,
        start: "19:30",
        end: "21:00",
        subject: Some("Physics"),
        topic: Some("Electromagnetism"),
        priority: Some(Priority::High),
        reason: "Hardest open topic for your nearest big exam.",
    },
    BlockSeed {
        kind: BlockKind::Review,
        start: "21:00",
        end: "22:00",
        subject: Some("Chemistry"),
        topic: Some("Chemical Bonding"),
        priority: Some(Priority::Low),
        reason: "Light recall to close the day; the exam is still weeks away.",
    },
];

const WEEK: &[(Weekday, u32, u32)] = &[
    (Weekday::Mon, 4, 3),
    (Weekday::Tue, 5, 4),
    (Weekday::Wed, 3, 2),
    (Weekday::Thu, 6, 5),
    (Weekday::Fri, 4, 3),
    (Weekday::Sat, 2, 2),
    (Weekday::Sun, 5, 4),
];

const TREND: &[(&str, u32)] = &[("W1", 20), ("W2", 35), ("W3", 48), ("W4", 65)];

impl MockCatalog {
    /// Build the demo catalog around `today`.
    ///
    /// # Errors
    ///
    /// Returns `planner_core::Error` if any seed fails domain validation.
    pub fn build(today: NaiveDate) -> Result<Self, planner_core::Error> {
        let mut next_topic_id = 1;
        let mut subjects = Vec::with_capacity(SUBJECTS.len());
        for (index, seed) in (1_u64..).zip(SUBJECTS) {
            let mut topics = Vec::with_capacity(seed.topics.len());
            for topic_seed in seed.topics {
                topics.push(build_topic(TopicId::new(next_topic_id), topic_seed, today)?);
                next_topic_id += 1;
            }
            subjects.push(Subject::new(
                SubjectId::new(index),
                seed.name,
                SubjectColor::new(seed.color)?,
                today + Duration::days(seed.exam_in_days),
                seed.xp_earned,
                topics,
            )?);
        }

        let schedule = (1_u64..)
            .zip(SCHEDULE)
            .map(|(id, b)| {
                ScheduleBlock::parse(
                    BlockId::new(id),
                    b.kind,
                    b.start,
                    b.end,
                    b.subject,
                    b.topic,
                    b.priority,
                    b.reason,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let week = WEEK
            .iter()
            .map(|(day, hours, topics)| DailyActivity::new(*day, *hours, *topics))
            .collect();

        let trend = TREND
            .iter()
            .map(|(label, pct)| Ok(ProgressPoint::new(*label, Progress::new(*pct)?)))
            .collect::<Result<Vec<_>, planner_core::Error>>()?;

        Ok(Self {
            subjects,
            schedule,
            week,
            trend,
        })
    }

    /// Load the catalog into a repository.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the repository rejects the data.
    pub async fn install(self, repo: &InMemoryRepository) -> Result<(), StorageError> {
        for subject in &self.subjects {
            repo.upsert_subject(subject).await?;
        }
        repo.replace_schedule(self.schedule).await?;
        repo.record_activity(self.week, self.trend).await?;
        Ok(())
    }
}

fn build_topic(id: TopicId, seed: &TopicSeed, today: NaiveDate) -> Result<Topic, planner_core::Error> {
    let mut topic = Topic::new(id, seed.name, seed.status, Difficulty::new(seed.difficulty)?)?;
    if let Some(days_ago) = seed.studied_days_ago {
        topic = topic.with_last_studied(today - Duration::days(days_ago));
    }
    if seed.ai_estimated {
        topic = topic.with_ai_estimate();
    }
    Ok(topic)
}

impl InMemoryRepository {
    /// A repository pre-filled with the demo catalog for `today`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the catalog fails validation or cannot be stored.
    pub async fn seeded(today: NaiveDate) -> Result<Self, SeedError> {
        let repo = Self::new();
        let catalog = MockCatalog::build(today)?;
        tracing::debug!(
            subjects = catalog.subjects.len(),
            blocks = catalog.schedule.len(),
            %today,
            "seeding demo catalog"
        );
        catalog.install(&repo).await?;
        Ok(repo)
    }
}
