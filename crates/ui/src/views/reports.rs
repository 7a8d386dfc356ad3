use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BarVm, ReportVm, StatusSliceVm, SubjectProgressVm};

#[derive(Clone, Debug, PartialEq, Eq)]
enum ExportState {
    Idle,
    Exporting,
    Done(String),
    Failed(&'static str),
}

#[component]
pub fn ReportsView() -> Element {
    let ctx = use_context::<AppContext>();
    let reports = ctx.reports();
    let mut export = use_signal(|| ExportState::Idle);

    let resource = use_resource(move || {
        let reports = reports.clone();
        async move {
            let report = reports.report().await.map_err(ViewError::from)?;
            Ok(ReportVm::from(&report))
        }
    });

    let on_download = move |_: MouseEvent| {
        let reports = ctx.reports();
        spawn(async move {
            export.set(ExportState::Exporting);
            match reports.export_json().await {
                Ok(json) => export.set(ExportState::Done(json)),
                Err(err) => export.set(ExportState::Failed(ViewError::from(err).message())),
            }
        });
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page reports",
            header { class: "reports__header",
                div {
                    h2 { "Reports" }
                    p { class: "muted", "Track your study progress and performance" }
                }
                button {
                    class: "btn btn--primary",
                    disabled: export() == ExportState::Exporting,
                    onclick: on_download,
                    "Download Report"
                }
            }

            match export() {
                ExportState::Idle | ExportState::Exporting => rsx! {},
                ExportState::Done(json) => rsx! {
                    details { class: "card export", open: true,
                        summary { "Report export (JSON)" }
                        pre { "{json}" }
                    }
                },
                ExportState::Failed(message) => rsx! {
                    p { class: "form-error", "{message}" }
                },
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    ReportBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ReportBody(vm: ReportVm) -> Element {
    rsx! {
        section { class: "stat-grid",
            QuickStat { value: vm.total_hours, label: "This Week" }
            QuickStat { value: vm.total_topics, label: "Topics Covered" }
            QuickStat { value: vm.daily_average, label: "Daily Average" }
            QuickStat { value: vm.completion_rate, label: "Completion Rate" }
        }

        div { class: "reports__charts",
            section { class: "card",
                h3 { "Weekly Study Hours" }
                BarChart { bars: vm.weekly_bars }
            }
            section { class: "card",
                h3 { "Topic Status" }
                ul { class: "legend",
                    for slice in vm.status {
                        StatusLegendRow { slice }
                    }
                }
            }
        }

        section { class: "card",
            h3 { "Overall Progress Trend" }
            BarChart { bars: vm.trend }
        }

        section { class: "card",
            h3 { "Subject Progress" }
            ul { class: "subject-progress",
                for subject in vm.subjects {
                    SubjectRow { subject }
                }
            }
        }
    }
}

#[component]
fn QuickStat(value: String, label: &'static str) -> Element {
    rsx! {
        div { class: "card stat",
            p { class: "stat__value", "{value}" }
            p { class: "stat__subtitle muted", "{label}" }
        }
    }
}

#[component]
fn BarChart(bars: Vec<BarVm>) -> Element {
    rsx! {
        div { class: "bar-chart",
            for bar in bars {
                div { class: "bar-chart__column",
                    span { class: "bar-chart__value", "{bar.value}" }
                    div { class: "bar-chart__bar", style: "height: {bar.height_percent}%" }
                    span { class: "bar-chart__label", "{bar.label}" }
                }
            }
        }
    }
}

#[component]
fn StatusLegendRow(slice: StatusSliceVm) -> Element {
    rsx! {
        li {
            span { class: "{slice.class}" }
            span { "{slice.label}" }
            span { class: "legend__count", "{slice.count}" }
        }
    }
}

#[component]
fn SubjectRow(subject: SubjectProgressVm) -> Element {
    rsx! {
        li {
            span { class: "swatch", style: "background: {subject.color}" }
            span { "{subject.name}" }
            span { class: "muted", "{subject.topics_label}" }
            div { class: "progress",
                div { class: "progress__fill", style: "width: {subject.progress}%; background: {subject.color}" }
            }
            span { "{subject.progress}%" }
        }
    }
}
