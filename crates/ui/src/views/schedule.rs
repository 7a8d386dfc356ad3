use std::collections::BTreeSet;

use dioxus::prelude::*;
use planner_core::model::StudyPreferencesDraft;
use services::{SessionError, XpGain};

use crate::context::{AppContext, use_current_user};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    BLOCK_COMPLETION_XP, ScheduleBlockVm, break_duration_options, format_hours,
    map_schedule_blocks, preferences_form,
};

#[derive(Clone, Debug, PartialEq)]
struct ScheduleData {
    blocks: Vec<ScheduleBlockVm>,
    summary: String,
}

#[component]
pub fn ScheduleView() -> Element {
    let ctx = use_context::<AppContext>();
    let schedule = ctx.schedule();
    let mut show_preferences = use_signal(|| false);
    let mut show_adjust = use_signal(|| false);
    let completed = use_signal(BTreeSet::<u64>::new);
    let notice = use_signal(|| None::<String>);

    let resource = use_resource(move || {
        let schedule = schedule.clone();
        async move {
            let plan = schedule.today().await.map_err(ViewError::from)?;
            Ok(ScheduleData {
                summary: format!(
                    "{} topics • {} of focused study",
                    plan.topics,
                    format_hours(plan.study_hours)
                ),
                blocks: map_schedule_blocks(&plan.blocks),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page schedule",
            header { class: "schedule__header",
                div {
                    h2 { "Smart Schedule" }
                    p { class: "muted", "Your day, arranged around your focus and your exams." }
                }
                button {
                    class: "btn btn--outline",
                    onclick: move |_| show_preferences.set(!show_preferences()),
                    if show_preferences() { "Hide Preferences" } else { "Preferences" }
                }
            }

            if show_preferences() {
                PreferencesPanel {}
            }

            div { class: "card info",
                p {
                    "Blocks are ordered by priority and energy. Open \"Why this timing?\" to see the reasoning behind each slot."
                }
            }

            if let Some(message) = notice() {
                p { class: "notice", "{message}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    p { class: "muted", "{data.summary}" }
                    ol { class: "timeline",
                        for block in data.blocks {
                            TimelineBlock {
                                key: "{block.id}",
                                done: completed.read().contains(&block.id),
                                block,
                                completed,
                                notice,
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                },
            }

            button {
                class: "card adjust",
                onclick: move |_| show_adjust.set(true),
                p { class: "adjust__title", "Feeling overwhelmed?" }
                p { class: "muted", "Click here to request changes" }
            }

            if show_adjust() {
                AdjustDialog { open: show_adjust }
            }
        }
    }
}

fn completion_notice(gain: &XpGain) -> String {
    if gain.leveled_up {
        format!("+{BLOCK_COMPLETION_XP} XP! Level up, you're now level {} 🎉", gain.level)
    } else {
        format!("+{BLOCK_COMPLETION_XP} XP, nice work! Total: {} XP", gain.xp)
    }
}

#[component]
fn TimelineBlock(
    block: ScheduleBlockVm,
    done: bool,
    completed: Signal<BTreeSet<u64>>,
    notice: Signal<Option<String>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut user = use_current_user();
    let mut completed = completed;
    let mut notice = notice;
    let id = block.id;

    let on_complete = move |_: MouseEvent| {
        let session = ctx.session();
        match session.add_xp(BLOCK_COMPLETION_XP) {
            Ok(gain) => {
                completed.write().insert(id);
                notice.set(Some(completion_notice(&gain)));
                user.refresh(&session);
            }
            Err(SessionError::NotAuthenticated) => {
                notice.set(Some("Sign in to earn XP.".to_string()));
            }
            Err(err) => notice.set(Some(err.to_string())),
        }
    };

    rsx! {
        li { class: if done { "{block.kind_class} block--done" } else { "{block.kind_class}" },
            div { class: "block__time",
                span { "{block.start}" }
                span { class: "muted", "to" }
                span { "{block.end}" }
            }
            div { class: "block__content",
                div { class: "block__heading",
                    h4 { "{block.title}" }
                    if let Some(priority) = block.priority {
                        span { class: "{block.priority_class}", "{priority}" }
                    }
                }
                if let Some(subject) = block.subject {
                    p { class: "muted", "{subject}" }
                }
                if let Some(reason) = block.reason {
                    details { class: "block__why",
                        summary { "✨ Why this timing?" }
                        p { "{reason}" }
                    }
                }
            }
            if block.completable {
                if done {
                    span { class: "badge badge--success", "Completed" }
                } else {
                    button { class: "btn btn--small", onclick: on_complete,
                        "Mark complete +{BLOCK_COMPLETION_XP} XP"
                    }
                }
            }
        }
    }
}

#[component]
fn PreferencesPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let mut user = use_current_user();
    let mut form = use_signal(|| {
        let saved = user.get();
        preferences_form(saved.as_ref().map(|u| u.preferences()))
    });
    let mut status = use_signal(|| None::<Result<(), String>>);

    let on_save = move |evt: FormEvent| {
        evt.prevent_default();
        let session = ctx.session();
        let draft: StudyPreferencesDraft = form();
        match session.save_preferences(draft) {
            Ok(_) => {
                user.refresh(&session);
                status.set(Some(Ok(())));
            }
            Err(err) => status.set(Some(Err(err.to_string()))),
        }
    };

    let values = form();

    rsx! {
        form { class: "card form preferences", onsubmit: on_save,
            h3 { "Study Preferences" }
            label { r#for: "start-time", "Study Start Time *" }
            input {
                id: "start-time",
                r#type: "time",
                value: "{values.start_time}",
                oninput: move |evt| form.write().start_time = evt.value(),
            }
            label { r#for: "end-time", "End Time (optional)" }
            input {
                id: "end-time",
                r#type: "time",
                value: "{values.end_time}",
                oninput: move |evt| form.write().end_time = evt.value(),
            }
            label { r#for: "lunch-time", "Break/Lunch Time (optional)" }
            input {
                id: "lunch-time",
                r#type: "time",
                value: "{values.lunch_time}",
                oninput: move |evt| form.write().lunch_time = evt.value(),
            }
            label { r#for: "break-duration", "Break Duration" }
            select {
                id: "break-duration",
                value: "{values.break_minutes}",
                onchange: move |evt| form.write().break_minutes = evt.value(),
                for (value, label) in break_duration_options() {
                    option { value: "{value}", selected: value == values.break_minutes, "{label}" }
                }
            }
            match status() {
                Some(Ok(())) => rsx! {
                    p { class: "notice", "Preferences saved" }
                },
                Some(Err(message)) => rsx! {
                    p { class: "form-error", "{message}" }
                },
                None => rsx! {},
            }
            button { class: "btn btn--primary", r#type: "submit", "Save Preferences" }
        }
    }
}

#[component]
fn AdjustDialog(open: Signal<bool>) -> Element {
    let mut open = open;

    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h3 { "I understand 💜" }
                p {
                    "Taking breaks is important for your wellbeing. But finishing this today means less stress tomorrow."
                }
                p { class: "muted",
                    "You can relax more after exams. Let's find a balance that works for you."
                }
                div { class: "dialog__actions",
                    button { class: "btn btn--outline", onclick: move |_| open.set(false), "Continue Plan" }
                    button { class: "btn btn--secondary", onclick: move |_| open.set(false), "Slightly Adjust" }
                    button { class: "btn btn--ghost", onclick: move |_| open.set(false), "I Need Rest" }
                }
            }
        }
    }
}
