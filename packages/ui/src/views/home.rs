use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};

/// Landing page after sign-in.
#[component]
pub fn HomeView() -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {
            p { class: "home__loading", "Loading..." }
        };
    }

    match state.user {
        Some(user) => {
            let name = user.display_name();
            let email = user.email.clone();
            rsx! {
                section {
                    class: "home",
                    h1 { "Welcome, {name}" }
                    p { "Signed in as {email}" }
                    LogoutButton { class: "form-btn" }
                }
            }
        }
        None => rsx! {
            section {
                class: "home",
                h1 { "Horizon" }
                p { "Sign in to see your accounts." }
                a { href: "/sign-in", class: "form-link", "Sign In" }
            }
        },
    }
}
