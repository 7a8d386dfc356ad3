use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{AuthError, SessionError};

use crate::context::{AppContext, use_current_user};
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Signup,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct AuthForm {
    name: String,
    email: String,
    password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Submitting,
    Failed(String),
}

fn failure_message(err: &SessionError) -> String {
    match err {
        SessionError::Auth(AuthError::InvalidCredentials) => {
            "That email and password don't match.".to_string()
        }
        SessionError::Auth(AuthError::Profile(inner)) | SessionError::User(inner) => {
            format!("Please check your details: {inner}.")
        }
        _ => "We couldn't sign you in right now. Please try again.".to_string(),
    }
}

/// Claim the form for one request. Returns `false` while a request is in flight.
fn begin_submit(state: &mut SubmitState) -> bool {
    if *state == SubmitState::Submitting {
        return false;
    }
    *state = SubmitState::Submitting;
    true
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = use_current_user();

    let mut mode = use_signal(|| AuthMode::Login);
    let mut form = use_signal(AuthForm::default);
    let mut submit_state = use_signal(|| SubmitState::Idle);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if !begin_submit(&mut submit_state.write()) {
            return;
        }
        let session = ctx.session();
        let values = form();
        let current_mode = mode();
        let mut user = user;
        spawn(async move {
            let result = match current_mode {
                AuthMode::Login => session.login(&values.email, &values.password).await,
                AuthMode::Signup => {
                    session
                        .signup(&values.name, &values.email, &values.password)
                        .await
                }
            };
            match result {
                Ok(_) => {
                    user.refresh(&session);
                    submit_state.set(SubmitState::Idle);
                    navigator.push(Route::Dashboard {});
                }
                Err(err) => submit_state.set(SubmitState::Failed(failure_message(&err))),
            }
        });
    };

    let submitting = submit_state() == SubmitState::Submitting;
    let is_signup = mode() == AuthMode::Signup;
    let values = form();
    let button_label = match (is_signup, submitting) {
        (false, false) => "Sign in",
        (false, true) => "Signing in...",
        (true, false) => "Create account",
        (true, true) => "Creating account...",
    };

    rsx! {
        div { class: "page page--centered login",
            h1 { "StudyPlanner" }
            p { class: "muted", "Plan smarter, revise on time, and keep your streak alive." }

            div { class: "tabs",
                button {
                    class: if is_signup { "tab" } else { "tab tab--active" },
                    onclick: move |_| {
                        mode.set(AuthMode::Login);
                        submit_state.set(SubmitState::Idle);
                    },
                    "Log in"
                }
                button {
                    class: if is_signup { "tab tab--active" } else { "tab" },
                    onclick: move |_| {
                        mode.set(AuthMode::Signup);
                        submit_state.set(SubmitState::Idle);
                    },
                    "Sign up"
                }
            }

            form { class: "card form", onsubmit: on_submit,
                if is_signup {
                    label { r#for: "name", "Name" }
                    input {
                        id: "name",
                        r#type: "text",
                        value: "{values.name}",
                        oninput: move |evt| form.write().name = evt.value(),
                    }
                }
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    value: "{values.email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{values.password}",
                    oninput: move |evt| form.write().password = evt.value(),
                }
                if let SubmitState::Failed(message) = submit_state() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: submitting,
                    "{button_label}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_is_claimed_before_the_request_runs() {
        let mut state = SubmitState::Idle;
        assert!(begin_submit(&mut state));
        assert_eq!(state, SubmitState::Submitting);
        assert!(!begin_submit(&mut state));
        assert_eq!(state, SubmitState::Submitting);
    }

    #[test]
    fn retry_is_allowed_after_a_failure() {
        let mut state = SubmitState::Failed("nope".to_string());
        assert!(begin_submit(&mut state));
        assert_eq!(state, SubmitState::Submitting);
    }
}
