use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::Link;
use services::QuoteRotation;

use crate::context::{AppContext, use_current_user};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, ScheduleBlockVm, StatCardVm, SubjectCountdownVm};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let user = use_current_user();
    let dashboard = ctx.dashboard();

    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        let current = user.get();
        async move {
            let snapshot = dashboard
                .snapshot(current.as_ref())
                .await
                .map_err(ViewError::from)?;
            Ok(DashboardVm::from_snapshot(&snapshot))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    DashboardBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(vm: DashboardVm) -> Element {
    rsx! {
        header { class: "dashboard__header",
            h2 { "{vm.heading}" }
            div { class: "badges",
                span { class: "badge badge--xp", "{vm.xp_label}" }
                span { class: "badge badge--level", "{vm.level_label}" }
                span { class: "badge badge--streak", "🔥 {vm.streak_label}" }
            }
            div { class: "level-bar",
                div { class: "level-bar__fill", style: "width: {vm.level_percent}%" }
            }
        }

        if vm.show_exam_banner {
            div { class: "banner banner--urgent", "Your exam is approaching! 📚" }
        }

        QuoteCard {}

        section { class: "stat-grid",
            for card in vm.stats {
                StatCard { card }
            }
        }

        if let Some(insight) = vm.insight {
            section { class: "card insight",
                h3 { "AI Insight" }
                p { "{insight}" }
                Link { class: "btn btn--ghost", to: Route::Schedule {}, "View Schedule" }
            }
        }

        div { class: "dashboard__columns",
            section { class: "card",
                h3 { "Today's Plan" }
                if vm.plan_preview.is_empty() {
                    p { class: "muted", "Nothing scheduled today." }
                } else {
                    ul { class: "plan-preview",
                        for block in vm.plan_preview {
                            PlanPreviewRow { block }
                        }
                    }
                }
                Link { to: Route::Schedule {}, "Full schedule" }
            }
            section { class: "card",
                h3 { "Subject Progress" }
                ul { class: "subject-progress",
                    for subject in vm.subjects {
                        SubjectProgressRow { subject }
                    }
                }
            }
        }
    }
}

/// Motivational quote that rotates for as long as the dashboard is mounted.
#[component]
fn QuoteCard() -> Element {
    let ctx = use_context::<AppContext>();
    let rotation =
        use_hook(|| Rc::new(QuoteRotation::start(ctx.quotes().clone(), ctx.quote_interval())));
    let mut quote = use_signal({
        let rotation = Rc::clone(&rotation);
        move || rotation.current()
    });

    use_future(move || {
        let mut updates = rotation.subscribe();
        async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                quote.set(next);
            }
        }
    });

    rsx! {
        blockquote { class: "card quote", "“{quote}”" }
    }
}

#[component]
fn StatCard(card: StatCardVm) -> Element {
    rsx! {
        div { class: "card stat stat--{card.tone}",
            p { class: "stat__title", "{card.title}" }
            p { class: "stat__value", "{card.value}" }
            p { class: "stat__subtitle muted", "{card.subtitle}" }
        }
    }
}

#[component]
fn PlanPreviewRow(block: ScheduleBlockVm) -> Element {
    rsx! {
        li { class: "{block.kind_class}",
            span { class: "block__time", "{block.time_range}" }
            span { class: "block__title", "{block.title}" }
            if let Some(subject) = block.subject {
                span { class: "muted", "{subject}" }
            }
        }
    }
}

#[component]
fn SubjectProgressRow(subject: SubjectCountdownVm) -> Element {
    rsx! {
        li {
            Link { to: Route::SubjectDetail { id: subject.id.to_string() },
                span { class: "swatch", style: "background: {subject.color}" }
                span { "{subject.name}" }
            }
            span { class: "{subject.badge_class}", "{subject.days_label}" }
            div { class: "progress",
                div { class: "progress__fill", style: "width: {subject.progress}%; background: {subject.color}" }
            }
            span { class: "muted", "{subject.progress}%" }
        }
    }
}
