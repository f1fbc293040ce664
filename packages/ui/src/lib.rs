//! This crate contains all shared UI for the workspace.

pub mod views;

mod auth;
pub use auth::{refresh_user, use_auth, AuthProvider, AuthState, LogoutButton};

mod identity;
pub use identity::{ApiIdentity, LocationNavigator};

mod custom_input;
pub use custom_input::CustomInput;

mod auth_form;
pub use auth_form::{footer_copy, heading, layout_rows, AuthForm};
