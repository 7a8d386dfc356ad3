use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::{AppContext, use_current_user};
use crate::views::{
    DashboardView, LoginView, ReportsView, ScheduleView, SubjectDetailView, SubjectsView,
};
use crate::vm::UserChipVm;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/subjects", SubjectsView)] Subjects {},
        #[route("/subjects/:id", SubjectDetailView)] SubjectDetail { id: String },
        #[route("/schedule", ScheduleView)] Schedule {},
        #[route("/reports", ReportsView)] Reports {},
}

#[component]
fn Layout() -> Element {
    let user = use_current_user();

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                if user.get().is_some() {
                    Outlet::<Route> {}
                } else {
                    SignInPrompt {}
                }
            }
        }
    }
}

#[component]
fn SignInPrompt() -> Element {
    rsx! {
        div { class: "page page--centered",
            h2 { "Sign in to continue" }
            p { class: "muted", "Your study plan is waiting." }
            Link { class: "btn btn--primary", to: Route::Login {}, "Go to login" }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut user = use_current_user();
    let chip = user.get().as_ref().map(UserChipVm::from_user);

    rsx! {
        nav { class: "sidebar",
            h1 { "StudyPlanner" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Subjects {}, "Subjects" } }
                li { Link { to: Route::Schedule {}, "Schedule" } }
                li { Link { to: Route::Reports {}, "Reports" } }
            }
            if let Some(chip) = chip {
                div { class: "user-chip",
                    p { class: "user-chip__name", "{chip.name}" }
                    p { class: "user-chip__stats",
                        span { class: "badge badge--xp", "{chip.xp_label}" }
                        span { class: "badge badge--level", "{chip.level_label}" }
                        span { class: "badge badge--streak", "{chip.streak_label}" }
                    }
                    button {
                        class: "btn btn--ghost",
                        onclick: move |_| {
                            let session = ctx.session();
                            session.logout();
                            user.refresh(&session);
                            navigator.push(Route::Login {});
                        },
                        "Log out"
                    }
                }
            }
        }
    }
}
