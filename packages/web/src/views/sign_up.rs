//! Sign-up page. After the account is created the form stays on this page for
//! the linking step.

use dioxus::prelude::*;
use forms::OperatingMode;
use ui::AuthForm;

#[component]
pub fn SignUp() -> Element {
    rsx! {
        main {
            class: "auth-page",
            AuthForm { mode: OperatingMode::SignUp }
        }
    }
}
