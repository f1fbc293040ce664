//! Session keys and helpers.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AuthError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Bind the session to a user, rotating its id first.
pub async fn remember_user(session: &Session, user_id: Uuid) -> Result<(), AuthError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await?;
    Ok(())
}

/// The user the session belongs to, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<Uuid>, AuthError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    Ok(user_id.map(|id| Uuid::parse_str(&id)).transpose()?)
}
