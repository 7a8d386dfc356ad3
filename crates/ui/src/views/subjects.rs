use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SubjectCardVm, SubjectTotalsVm, map_subject_cards};

#[derive(Clone, Debug, PartialEq)]
struct SubjectsData {
    totals: SubjectTotalsVm,
    cards: Vec<SubjectCardVm>,
}

#[component]
pub fn SubjectsView() -> Element {
    let ctx = use_context::<AppContext>();
    let subjects = ctx.subjects();

    let resource = use_resource(move || {
        let subjects = subjects.clone();
        async move {
            let cards = subjects.list_overview().await.map_err(ViewError::from)?;
            let totals = subjects.totals().await.map_err(ViewError::from)?;
            Ok(SubjectsData {
                totals: SubjectTotalsVm::from(totals),
                cards: map_subject_cards(&cards),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page subjects",
            h2 { "My Subjects" }
            p { class: "muted", "Track progress and exam countdowns for every subject." }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    section { class: "stat-grid",
                        div { class: "card stat",
                            p { class: "stat__title", "Active Subjects" }
                            p { class: "stat__value", "{data.totals.active}" }
                        }
                        div { class: "card stat",
                            p { class: "stat__title", "Topics Revised" }
                            p { class: "stat__value", "{data.totals.revised}" }
                        }
                        div { class: "card stat",
                            p { class: "stat__title", "Total XP Earned" }
                            p { class: "stat__value", "{data.totals.xp}" }
                        }
                    }
                    section { class: "subject-grid",
                        for card in data.cards {
                            SubjectCard { card }
                        }
                        AddSubjectCard {}
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn SubjectCard(card: SubjectCardVm) -> Element {
    rsx! {
        Link { class: "card subject-card", to: Route::SubjectDetail { id: card.id.clone() },
            div { class: "subject-card__header",
                span { class: "swatch", style: "background: {card.color}" }
                div {
                    h3 { "{card.name}" }
                    p { class: "muted", "{card.summary}" }
                }
                span { class: "{card.badge_class}", "{card.days_label}" }
            }
            div { class: "subject-card__body",
                svg { class: "ring", width: "64", height: "64", view_box: "0 0 64 64",
                    circle { cx: "32", cy: "32", r: "28", class: "ring__track" }
                    circle {
                        cx: "32",
                        cy: "32",
                        r: "28",
                        class: "ring__fill",
                        stroke: "{card.color}",
                        stroke_dasharray: "{card.ring_dash}",
                    }
                }
                span { class: "ring__label", "{card.progress}%" }
                div {
                    p { "{card.exam_label}" }
                    p { class: "muted", "{card.xp_label}" }
                }
            }
            div { class: "topic-dots",
                for dot in card.topic_dots {
                    span { class: "{dot}" }
                }
            }
        }
    }
}

#[component]
fn AddSubjectCard() -> Element {
    rsx! {
        div { class: "card subject-card subject-card--add",
            p { class: "subject-card__plus", "+" }
            p { "Add Subject" }
            p { class: "muted", "Coming soon" }
        }
    }
}
