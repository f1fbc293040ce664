//! # Sign-in / sign-up form
//!
//! [`AuthForm`] renders a [`FormState`] held in a signal and drives submissions with
//! the same pipeline as [`forms::FormController`]: `begin_submit` on the signal,
//! [`orchestrator::execute`] against [`ApiIdentity`] with no borrow held, then
//! [`orchestrator::settle`] back into the signal, and [`orchestrator::follow`] once the
//! write guard is released.
//!
//! After a successful sign-up the form switches to the linking step and only the
//! header stays visible.

use dioxus::prelude::*;
use forms::{
    orchestrator, FieldBinding, FieldName, FormState, OperatingMode, Presentation,
    SubmissionOutcome,
};

use crate::auth::{refresh_user, use_auth};
use crate::custom_input::CustomInput;
use crate::identity::{ApiIdentity, LocationNavigator};

const AUTH_CSS: Asset = asset!("/assets/auth.css");
const LOGO: Asset = asset!("/assets/logo.svg");

/// Title and subtitle of the form header.
pub fn heading(mode: OperatingMode, presentation: Presentation) -> (&'static str, &'static str) {
    match (presentation, mode) {
        (Presentation::Linking, _) => ("Link Account", "Link your account to get started"),
        (Presentation::Credentials, OperatingMode::SignIn) => ("Sign In", "Please enter your details"),
        (Presentation::Credentials, OperatingMode::SignUp) => ("Sign Up", "Please enter your details"),
    }
}

/// Footer prompt and the label of the link to the other mode.
pub fn footer_copy(mode: OperatingMode) -> (&'static str, &'static str) {
    match mode {
        OperatingMode::SignIn => ("Don't have an account?", "Sign Up"),
        OperatingMode::SignUp => ("Already have an account?", "Sign In"),
    }
}

/// Group bindings into layout rows. Short profile fields share a row with their partner.
pub fn layout_rows(bindings: Vec<FieldBinding>) -> Vec<Vec<FieldBinding>> {
    let mut rows: Vec<Vec<FieldBinding>> = Vec::new();
    for binding in bindings {
        let pairs_with_previous = matches!(
            binding.name,
            FieldName::LastName | FieldName::PostalCode | FieldName::Ssn
        );
        match rows.last_mut() {
            Some(row) if pairs_with_previous && row.len() == 1 => row.push(binding),
            _ => rows.push(vec![binding]),
        }
    }
    rows
}

#[component]
pub fn AuthForm(mode: OperatingMode) -> Element {
    let mut form_state = use_signal(move || FormState::new(mode));
    let mut auth = use_auth();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let begun = form_state.write().begin_submit();
            let pending = match begun {
                Ok(pending) => pending,
                Err(reason) => {
                    tracing::debug!(%reason, "auth form submission rejected");
                    return;
                }
            };

            let result = orchestrator::execute(&ApiIdentity, pending).await;
            let outcome = orchestrator::settle(&mut form_state.write(), result);
            orchestrator::follow(&outcome, &LocationNavigator);

            if let SubmissionOutcome::Linked(_) = outcome {
                refresh_user(&mut auth).await;
            }
        });
    };

    let state = form_state();
    let (title, subtitle) = heading(mode, state.presentation());
    let (prompt, link_label) = footer_copy(mode);
    let other_path = mode.other().path();
    let submitting = state.is_submitting();
    let submit_label = if submitting {
        "Loading..."
    } else {
        heading(mode, Presentation::Credentials).0
    };
    let linking = state.presentation() == Presentation::Linking;
    let error = state.submission_error().map(ToString::to_string);
    let rows = layout_rows(state.bindings());

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        section {
            class: "auth-form",

            header {
                class: "flex flex-col gap-5 md:gap-8",

                a {
                    href: "/",
                    class: "auth-form__brand",
                    img { src: LOGO, width: 34, height: 34, alt: "Horizon logo" }
                    h1 { "Horizon" }
                }

                div {
                    class: "auth-form__heading",
                    h1 { "{title}" }
                    p { "{subtitle}" }
                }
            }

            if linking {
                div { class: "flex flex-col gap-4" }
            } else {
                form {
                    onsubmit: onsubmit,
                    class: "auth-form__fields",

                    if let Some(err) = error {
                        div {
                            class: "auth-form__error",
                            "{err}"
                        }
                    }

                    for row in rows {
                        div {
                            class: "auth-form__row",
                            for binding in row {
                                CustomInput { binding: binding, form: form_state }
                            }
                        }
                    }

                    button {
                        r#type: "submit",
                        class: "form-btn",
                        disabled: submitting,
                        "{submit_label}"
                    }
                }

                footer {
                    class: "auth-form__footer",
                    p { "{prompt}" }
                    a {
                        href: "{other_path}",
                        class: "form-link",
                        "{link_label}"
                    }
                }
            }
        }
    }
}
