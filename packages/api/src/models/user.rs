//! # User model
//!
//! ## [`User`] (server only)
//!
//! A full row of the `users` table, loaded with [`sqlx::FromRow`]: credentials
//! (`email`, Argon2 `password_hash`), the sign-up profile, and audit timestamps.
//! Only the last four digits of the SSN are kept.
//!
//! ## [`UserInfo`]
//!
//! The client-safe projection sent through server functions. No hash, no address,
//! no SSN, and the `Uuid` becomes a `String` so it works in WASM.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use forms::{SessionRef, UserRef};
#[cfg(feature = "server")]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub date_of_birth: NaiveDate,
    pub ssn_last4: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            id: self.id.to_string(),
        }
    }

    pub fn to_session_ref(&self) -> SessionRef {
        SessionRef {
            user_id: self.id.to_string(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserInfo {
    /// Full name, falling back to the email when no name was given.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(first: &str, last: &str) -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(info("John", "Doe").display_name(), "John Doe");
        assert_eq!(info("John", " ").display_name(), "John");
        assert_eq!(info("", "").display_name(), "a@b.com");
    }
}
