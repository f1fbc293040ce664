//! Mutable state of one authentication form.

use std::collections::BTreeMap;

use crate::mode::OperatingMode;
use crate::orchestrator::{FailureReason, PendingSubmission, RejectReason};
use crate::schema::{schema_for, FieldError, FieldName, FieldSchema, ValidationResult};
use crate::service::UserRef;

/// What the form shows: the credential fields, or the follow-up linking step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    Credentials,
    Linking,
}

/// Values, errors and submission flags of a single form instance.
///
/// `values` always holds exactly the fields of the mode's schema. Field-level
/// validation errors and the form-level submission error are kept apart and never
/// mixed.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub(crate) schema: FieldSchema,
    pub(crate) values: BTreeMap<FieldName, String>,
    pub(crate) field_errors: BTreeMap<FieldName, FieldError>,
    pub(crate) is_submitting: bool,
    pub(crate) linked_user: Option<UserRef>,
    pub(crate) submission_error: Option<FailureReason>,
    pub(crate) submit_count: u32,
}

impl FormState {
    pub fn new(mode: OperatingMode) -> Self {
        let schema = schema_for(mode);
        let values = schema.names().map(|name| (name, String::new())).collect();
        Self {
            schema,
            values,
            field_errors: BTreeMap::new(),
            is_submitting: false,
            linked_user: None,
            submission_error: None,
            submit_count: 0,
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.schema.mode()
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn values(&self) -> &BTreeMap<FieldName, String> {
        &self.values
    }

    pub fn value(&self, name: FieldName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<FieldName, FieldError> {
        &self.field_errors
    }

    pub fn field_error(&self, name: FieldName) -> Option<&FieldError> {
        self.field_errors.get(&name)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn linked_user(&self) -> Option<&UserRef> {
        self.linked_user.as_ref()
    }

    /// Failure of the last submission attempt, if it failed.
    pub fn submission_error(&self) -> Option<&FailureReason> {
        self.submission_error.as_ref()
    }

    /// Number of submit attempts, including rejected ones.
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn presentation(&self) -> Presentation {
        if self.linked_user.is_some() {
            Presentation::Linking
        } else {
            Presentation::Credentials
        }
    }

    /// Store a raw value. Names outside the active schema are ignored.
    ///
    /// Once the user has tried to submit, the edited field is re-validated so its
    /// inline error follows the input.
    pub fn set_field(&mut self, name: FieldName, raw: impl Into<String>) {
        let Some(spec) = self.schema.field(name) else {
            tracing::debug!(field = %name, mode = %self.mode(), "ignoring edit of unbound field");
            return;
        };
        let raw = raw.into();

        if self.submit_count > 0 {
            match spec.constraint.check(&raw) {
                Ok(()) => {
                    self.field_errors.remove(&name);
                }
                Err(error) => {
                    self.field_errors.insert(name, error);
                }
            }
        }

        self.values.insert(name, raw);
    }

    /// Validate all values and publish the per-field errors.
    pub fn validate(&mut self) -> ValidationResult {
        let result = self.schema.validate(&self.values);
        self.field_errors = result.errors.clone();
        result
    }

    /// Guard and start a submission.
    ///
    /// Rejects without side effects on the submission flags when one is already in
    /// flight, or when validation fails. On success the form is marked submitting and
    /// the returned submission carries a snapshot of the current values.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, RejectReason> {
        if self.is_submitting {
            return Err(RejectReason::AlreadySubmitting);
        }

        self.submit_count += 1;
        if !self.validate().is_valid() {
            return Err(RejectReason::ValidationFailed);
        }

        self.is_submitting = true;
        self.submission_error = None;
        Ok(PendingSubmission::snapshot(self.mode(), &self.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_sign_in() -> FormState {
        let mut state = FormState::new(OperatingMode::SignIn);
        state.set_field(FieldName::Email, "a@b.com");
        state.set_field(FieldName::Password, "secret1");
        state
    }

    #[test]
    fn test_values_follow_schema() {
        let state = FormState::new(OperatingMode::SignUp);
        assert_eq!(
            state.values().keys().copied().collect::<Vec<_>>(),
            state.schema().names().collect::<Vec<_>>()
        );
        assert!(state.values().values().all(String::is_empty));
        assert_eq!(state.presentation(), Presentation::Credentials);
    }

    #[test]
    fn test_set_field_stores_raw_value() {
        let mut state = FormState::new(OperatingMode::SignIn);
        state.set_field(FieldName::Email, "  A@B.com ");
        assert_eq!(state.value(FieldName::Email), Some("  A@B.com "));
    }

    #[test]
    fn test_set_field_outside_schema_is_noop() {
        let mut state = FormState::new(OperatingMode::SignIn);
        let before = state.clone();

        state.set_field(FieldName::FirstName, "John");

        assert_eq!(state, before);
        assert_eq!(state.value(FieldName::FirstName), None);
    }

    #[test]
    fn test_validate_populates_field_errors() {
        let mut state = FormState::new(OperatingMode::SignIn);
        state.set_field(FieldName::Password, "secret1");

        let result = state.validate();

        assert!(!result.is_valid());
        assert_eq!(
            state.field_error(FieldName::Email),
            Some(&FieldError::Required)
        );
        assert_eq!(state.field_error(FieldName::Password), None);
    }

    #[test]
    fn test_edits_do_not_validate_before_first_submit() {
        let mut state = FormState::new(OperatingMode::SignIn);
        state.set_field(FieldName::Email, "nope");
        assert!(state.field_errors().is_empty());
    }

    #[test]
    fn test_edits_revalidate_after_rejected_submit() {
        let mut state = FormState::new(OperatingMode::SignIn);
        assert_eq!(state.begin_submit(), Err(RejectReason::ValidationFailed));
        assert_eq!(state.submit_count(), 1);
        assert!(state.field_error(FieldName::Email).is_some());

        state.set_field(FieldName::Email, "a@b");
        assert_eq!(
            state.field_error(FieldName::Email),
            Some(&FieldError::InvalidEmail)
        );

        state.set_field(FieldName::Email, "a@b.com");
        assert_eq!(state.field_error(FieldName::Email), None);
        // Untouched fields keep their error.
        assert_eq!(
            state.field_error(FieldName::Password),
            Some(&FieldError::Required)
        );
    }

    #[test]
    fn test_begin_submit_marks_submitting_and_snapshots() {
        let mut state = filled_sign_in();

        let pending = state.begin_submit().unwrap();
        assert!(state.is_submitting());

        state.set_field(FieldName::Password, "changed-later");
        match pending {
            PendingSubmission::SignIn(credentials) => {
                assert_eq!(credentials.password, "secret1");
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn test_begin_submit_rejects_while_in_flight() {
        let mut state = filled_sign_in();
        state.begin_submit().unwrap();

        assert_eq!(state.begin_submit(), Err(RejectReason::AlreadySubmitting));
        assert_eq!(state.submit_count(), 1);
        assert!(state.is_submitting());
    }
}
