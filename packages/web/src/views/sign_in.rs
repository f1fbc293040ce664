//! Sign-in page.

use dioxus::prelude::*;
use forms::OperatingMode;
use ui::{use_auth, AuthForm};

use super::redirect_home;

#[component]
pub fn SignIn() -> Element {
    let auth = use_auth();

    // Already signed in
    if !auth().loading && auth().user.is_some() {
        redirect_home();
    }

    rsx! {
        main {
            class: "auth-page",
            AuthForm { mode: OperatingMode::SignIn }
        }
    }
}
