//! # Local accounts
//!
//! Account creation and credential checks behind the `sign_up` and `sign_in` server
//! functions. Sign-up payloads are validated again here with the same schema the form
//! uses, so a client that skips validation gets the same answer.

use chrono::NaiveDate;
use forms::{schema_for, OperatingMode, SignInPayload, SignUpPayload};
use sqlx::PgPool;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::error::AuthError;
use crate::models::User;

/// Emails are matched case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_sign_up(payload: &SignUpPayload) -> Result<NaiveDate, AuthError> {
    let validation = schema_for(OperatingMode::SignUp).validate(&payload.to_values());
    if let Some((field, error)) = validation.first_error() {
        return Err(AuthError::InvalidField {
            field: field.to_string(),
            message: error.to_string(),
        });
    }

    NaiveDate::parse_from_str(payload.date_of_birth.trim(), "%Y-%m-%d").map_err(|e| {
        AuthError::InvalidField {
            field: "dateofbirth".to_string(),
            message: e.to_string(),
        }
    })
}

fn ssn_last4(ssn: &str) -> String {
    let digits = ssn.trim();
    let skip = digits.chars().count().saturating_sub(4);
    digits.chars().skip(skip).collect()
}

/// A concurrent sign-up can pass the duplicate check and still lose on the `UNIQUE`
/// email index.
fn insert_error(e: sqlx::Error) -> AuthError {
    if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
        return AuthError::EmailTaken;
    }
    AuthError::Database(e)
}

/// Create a local account from a sign-up payload.
pub async fn create_account(pool: &PgPool, payload: &SignUpPayload) -> Result<User, AuthError> {
    let date_of_birth = check_sign_up(payload)?;
    let email = normalize_email(&payload.email);

    let existing: Option<(i64,)> = sqlx::query_as("SELECT 1::BIGINT FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let password_hash = hash_password(&payload.password)?;

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (
            email, password_hash, first_name, last_name, address,
            city, state, postal_code, date_of_birth, ssn_last4
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(payload.first_name.trim())
    .bind(payload.last_name.trim())
    .bind(payload.address.trim())
    .bind(payload.city.trim())
    .bind(payload.state.trim().to_uppercase())
    .bind(payload.postal_code.trim())
    .bind(date_of_birth)
    .bind(ssn_last4(&payload.ssn))
    .fetch_one(pool)
    .await
    .map_err(insert_error)?;

    tracing::info!(user_id = %user.id, "created account");
    Ok(user)
}

/// Check credentials. `Ok(None)` for an unknown email or a wrong password.
pub async fn authenticate(
    pool: &PgPool,
    credentials: &SignInPayload,
) -> Result<Option<User>, AuthError> {
    let email = normalize_email(&credentials.email);

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    let Some(user) = user else {
        return Ok(None);
    };

    if verify_password(&credentials.password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

pub async fn find_user(pool: &PgPool, id: Uuid) -> Result<Option<User>, AuthError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SignUpPayload {
        SignUpPayload {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            postal_code: "11101".to_string(),
            date_of_birth: "1990-01-31".to_string(),
            ssn: "123456789".to_string(),
            email: " A@B.com ".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" A@B.com "), "a@b.com");
    }

    #[test]
    fn test_check_sign_up_accepts_valid_payload() {
        let dob = check_sign_up(&payload()).unwrap();
        assert_eq!(dob, NaiveDate::from_ymd_opt(1990, 1, 31).unwrap());
    }

    #[test]
    fn test_check_sign_up_reports_first_invalid_field() {
        let mut invalid = payload();
        invalid.city = String::new();
        invalid.email = "nope".to_string();

        match check_sign_up(&invalid) {
            Err(AuthError::InvalidField { field, message }) => {
                assert_eq!(field, "city");
                assert_eq!(message, "This field is required");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("duplicate key value violates unique constraint \"users_email_key\"")]
    struct DuplicateEmail;

    impl sqlx::error::DatabaseError for DuplicateEmail {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_email_key\""
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_on_insert_is_email_taken() {
        let err = insert_error(sqlx::Error::Database(Box::new(DuplicateEmail)));
        assert!(matches!(err, AuthError::EmailTaken));

        let err = insert_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_only_last_four_ssn_digits_are_kept() {
        assert_eq!(ssn_last4("123456789"), "6789");
        assert_eq!(ssn_last4(" 1234 "), "1234");
    }
}
