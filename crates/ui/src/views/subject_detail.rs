use dioxus::prelude::*;
use dioxus_router::Link;
use planner_core::model::SubjectId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SubjectDetailVm, TopicRowVm};

#[component]
pub fn SubjectDetailView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let subjects = ctx.subjects();

    let resource = use_resource(use_reactive((&id,), move |(id,)| {
        let subjects = subjects.clone();
        async move {
            let Ok(subject_id) = id.parse::<SubjectId>() else {
                tracing::debug!(%id, "ignoring malformed subject id");
                return Ok(None);
            };
            let detail = subjects.detail(subject_id).await.map_err(ViewError::from)?;
            Ok(detail.as_ref().map(SubjectDetailVm::from))
        }
    }));

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page subject-detail",
            Link { class: "back-link", to: Route::Subjects {}, "← Back to Subjects" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(None) => rsx! {
                    h2 { "Subject not found" }
                    p { class: "muted", "It may have been removed." }
                },
                ViewState::Ready(Some(vm)) => rsx! {
                    DetailBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn DetailBody(vm: SubjectDetailVm) -> Element {
    rsx! {
        header { class: "subject-detail__header",
            span { class: "swatch swatch--large", style: "background: {vm.color}" }
            div {
                h2 { "{vm.name}" }
                p { class: "muted", "{vm.summary}" }
            }
        }

        section { class: "stat-grid",
            div { class: "card stat",
                p { class: "stat__title", "Days Left" }
                p { class: "stat__value", "{vm.days_left}" }
            }
            div { class: "card stat",
                p { class: "stat__title", "Revised" }
                p { class: "stat__value", "{vm.revised}" }
            }
            div { class: "card stat",
                p { class: "stat__title", "XP Earned" }
                p { class: "stat__value", "{vm.xp_earned}" }
            }
            div { class: "card stat",
                p { class: "stat__title", "In Progress" }
                p { class: "stat__value", "{vm.in_progress}" }
            }
        }

        div { class: "progress",
            div { class: "progress__fill", style: "width: {vm.progress}%; background: {vm.color}" }
        }

        section { class: "card",
            h3 { "Topics" }
            ul { class: "topic-list",
                for topic in vm.topics {
                    TopicRow { topic }
                }
            }
        }

        section { class: "card insight",
            h3 { "AI Scheduling Note" }
            p {
                "Topics marked as AI estimated have their difficulty inferred from your past sessions. Harder topics are placed in your peak focus hours."
            }
        }
    }
}

#[component]
fn TopicRow(topic: TopicRowVm) -> Element {
    rsx! {
        li { class: "topic-row",
            span { class: "{topic.dot_class}" }
            div { class: "topic-row__main",
                p { class: "topic-row__name",
                    "{topic.name}"
                    if topic.ai_estimated {
                        span { class: "badge badge--ai", "AI estimated" }
                    }
                }
                if let Some(last) = topic.last_studied {
                    p { class: "muted", "{last}" }
                }
            }
            span { class: "stars",
                for filled in topic.stars {
                    span { class: if filled { "star star--filled" } else { "star" }, "★" }
                }
            }
            span { class: "{topic.status_class}", "{topic.status_label}" }
        }
    }
}
