//! Server-side failures of the identity service.

/// Everything that can go wrong while creating an account or opening a session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("invalid user id: {0}")]
    UserId(#[from] uuid::Error),
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
    #[error("An account with this email already exists")]
    EmailTaken,
}
