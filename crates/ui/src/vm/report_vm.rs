use services::StudyReport;

use crate::vm::time_fmt::{format_average_hours, format_hours};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarVm {
    pub label: String,
    pub value: String,
    /// Bar height relative to the tallest bar, 0-100.
    pub height_percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSliceVm {
    pub label: &'static str,
    pub count: usize,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectProgressVm {
    pub name: String,
    pub color: String,
    pub topics_label: String,
    pub progress: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub total_hours: String,
    pub total_topics: String,
    pub daily_average: String,
    pub completion_rate: String,
    pub weekly_bars: Vec<BarVm>,
    pub status: Vec<StatusSliceVm>,
    pub trend: Vec<BarVm>,
    pub subjects: Vec<SubjectProgressVm>,
}

impl From<&StudyReport> for ReportVm {
    fn from(report: &StudyReport) -> Self {
        let max_hours = report.week.iter().map(|d| d.hours).max().unwrap_or(0);
        let weekly_bars = report
            .week
            .iter()
            .map(|d| BarVm {
                label: d.day_label(),
                value: format_hours(d.hours),
                height_percent: relative(d.hours, max_hours),
            })
            .collect();

        let trend = report
            .trend
            .iter()
            .map(|p| BarVm {
                label: p.label.clone(),
                value: p.progress.to_string(),
                height_percent: u32::from(p.progress.percent()),
            })
            .collect();

        let status = vec![
            StatusSliceVm {
                label: "Revised",
                count: report.topic_status.revised,
                class: "dot dot--revised",
            },
            StatusSliceVm {
                label: "Learning",
                count: report.topic_status.learning,
                class: "dot dot--learning",
            },
            StatusSliceVm {
                label: "New",
                count: report.topic_status.new,
                class: "dot dot--new",
            },
        ];

        Self {
            total_hours: format_hours(report.totals.hours),
            total_topics: report.totals.topics.to_string(),
            daily_average: format_average_hours(report.totals.average_hours_per_day),
            completion_rate: report.completion_rate.to_string(),
            weekly_bars,
            status,
            trend,
            subjects: report
                .subjects
                .iter()
                .map(|s| SubjectProgressVm {
                    name: s.name.clone(),
                    color: s.color.clone(),
                    topics_label: format!("{} topics", s.topic_count),
                    progress: s.progress.percent(),
                })
                .collect(),
        }
    }
}

fn relative(value: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    value * 100 / max
}
