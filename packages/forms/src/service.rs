//! Collaborators the form talks to: the identity service and the navigator.

use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::schema::FieldName;

/// Opaque reference to an account created by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
}

/// Opaque reference to a session opened by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    pub user_id: String,
}

/// Profile and credentials sent when creating an account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignUpPayload {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "code")]
    pub postal_code: String,
    #[serde(rename = "dateofbirth")]
    pub date_of_birth: String,
    pub ssn: String,
    pub email: String,
    pub password: String,
}

impl SignUpPayload {
    pub fn from_values(values: &BTreeMap<FieldName, String>) -> Self {
        let get = |name: FieldName| values.get(&name).cloned().unwrap_or_default();
        Self {
            first_name: get(FieldName::FirstName),
            last_name: get(FieldName::LastName),
            address: get(FieldName::Address),
            city: get(FieldName::City),
            state: get(FieldName::State),
            postal_code: get(FieldName::PostalCode),
            date_of_birth: get(FieldName::DateOfBirth),
            ssn: get(FieldName::Ssn),
            email: get(FieldName::Email),
            password: get(FieldName::Password),
        }
    }

    /// The payload as a field map, for re-validation on the receiving side.
    pub fn to_values(&self) -> BTreeMap<FieldName, String> {
        BTreeMap::from([
            (FieldName::FirstName, self.first_name.clone()),
            (FieldName::LastName, self.last_name.clone()),
            (FieldName::Address, self.address.clone()),
            (FieldName::City, self.city.clone()),
            (FieldName::State, self.state.clone()),
            (FieldName::PostalCode, self.postal_code.clone()),
            (FieldName::DateOfBirth, self.date_of_birth.clone()),
            (FieldName::Ssn, self.ssn.clone()),
            (FieldName::Email, self.email.clone()),
            (FieldName::Password, self.password.clone()),
        ])
    }
}

/// Credentials sent when signing in. Profile fields are never part of it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignInPayload {
    pub email: String,
    pub password: String,
}

impl SignInPayload {
    pub fn from_values(values: &BTreeMap<FieldName, String>) -> Self {
        Self {
            email: values.get(&FieldName::Email).cloned().unwrap_or_default(),
            password: values.get(&FieldName::Password).cloned().unwrap_or_default(),
        }
    }
}

/// Any failure reported by the identity service. The form only cares that it failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("identity service unreachable: {0}")]
    Unreachable(String),
    #[error("identity service rejected the request: {0}")]
    Rejected(String),
}

/// Account creation and sign-in backend.
pub trait IdentityService {
    fn sign_up(
        &self,
        payload: SignUpPayload,
    ) -> impl Future<Output = Result<UserRef, ServiceError>>;

    /// `Ok(None)` means the credentials were not accepted.
    fn sign_in(
        &self,
        credentials: SignInPayload,
    ) -> impl Future<Output = Result<Option<SessionRef>, ServiceError>>;
}

/// Client-side routing capability. Fire-and-forget.
pub trait Navigator {
    fn navigate(&self, path: &str);
}
