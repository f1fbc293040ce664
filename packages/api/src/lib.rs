//! # API crate: identity server functions for Horizon
//!
//! The identity service behind the authentication form. Every public `async fn` here is
//! a Dioxus server function, compiled once with the server logic (behind
//! `#[cfg(feature = "server")]`) and once as a client stub that forwards the call over
//! HTTP.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Account creation, credential checks, Argon2 hashing, session helpers |
//! | [`db`] | `server` | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`error`] | `server` | [`AuthError`](error::AuthError), mapped to `ServerFnError` at each boundary |
//! | [`models`] | always | `User` row and its client-safe projection [`UserInfo`] |
//! | [`settings`] | `server` | Layered configuration (`config.toml`, `HORIZON__*` env) |
//!
//! ## Server functions
//!
//! - `sign_up`: validate, create the account, open a session, return a [`UserRef`].
//! - `sign_in`: check credentials; `None` when they are wrong, otherwise open a session.
//! - `get_logged_in_user`: the user bound to the current session.
//! - `logout`: flush the session.

use dioxus::prelude::*;
use forms::{SessionRef, SignInPayload, SignUpPayload, UserRef};

pub mod auth;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;

pub use models::UserInfo;

/// Create an account from the sign-up form and sign the new user in.
#[cfg(feature = "server")]
#[post("/api/auth/sign-up", session: tower_sessions::Session)]
pub async fn sign_up(payload: SignUpPayload) -> Result<UserRef, ServerFnError> {
    use crate::db::get_pool;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user = auth::create_account(pool, &payload)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    auth::remember_user(&session, user.id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_user_ref())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-up")]
pub async fn sign_up(payload: SignUpPayload) -> Result<UserRef, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign in with email and password. Wrong credentials yield `None`, not an error.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in(credentials: SignInPayload) -> Result<Option<SessionRef>, ServerFnError> {
    use crate::db::get_pool;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user = auth::authenticate(pool, &credentials)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        tracing::info!("rejected sign-in");
        return Ok(None);
    };

    auth::remember_user(&session, user.id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(Some(user.to_session_ref()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in(credentials: SignInPayload) -> Result<Option<SessionRef>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the user bound to the current session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_logged_in_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user_id = auth::current_user_id(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user = auth::find_user(pool, user_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_logged_in_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}
