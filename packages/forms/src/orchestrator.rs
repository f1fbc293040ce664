//! # Submission orchestration
//!
//! A submission runs in four steps so that it can be driven from any state container
//! (a `RefCell` in [`crate::FormController`], a reactive signal in the UI):
//!
//! 1. [`FormState::begin_submit`] guards, snapshots the values and sets `is_submitting`.
//! 2. [`execute`] sends the mode-specific payload to the [`IdentityService`]. It holds no
//!    borrow of the state, so edits made while it is pending do not reach the payload.
//! 3. [`settle`] applies the [`SubmissionResult`] and always clears `is_submitting`.
//! 4. [`follow`] hands a sign-in's navigation intent to the [`Navigator`], once the
//!    state is no longer borrowed.
//!
//! | Mode | Payload | On success |
//! |------|---------|------------|
//! | `sign-up` | every field | `linked_user` is set, form enters the linking step |
//! | `sign-in` | `email`, `password` | navigation intent to [`ROOT_PATH`] |
//!
//! Any service error, and a sign-in that returns no session, becomes a
//! [`FailureReason`]. The raw error is logged, never shown, and never touches
//! field errors.

use std::collections::BTreeMap;
use std::fmt;

use crate::mode::OperatingMode;
use crate::schema::FieldName;
use crate::service::{
    IdentityService, Navigator, SessionRef, SignInPayload, SignUpPayload, UserRef,
};
use crate::state::FormState;

/// Where a successful sign-in sends the user.
pub const ROOT_PATH: &str = "/";

/// A validated, snapshotted request waiting to be sent.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingSubmission {
    SignUp(SignUpPayload),
    SignIn(SignInPayload),
}

impl PendingSubmission {
    pub(crate) fn snapshot(mode: OperatingMode, values: &BTreeMap<FieldName, String>) -> Self {
        match mode {
            OperatingMode::SignUp => PendingSubmission::SignUp(SignUpPayload::from_values(values)),
            OperatingMode::SignIn => PendingSubmission::SignIn(SignInPayload::from_values(values)),
        }
    }

    pub fn mode(&self) -> OperatingMode {
        match self {
            PendingSubmission::SignUp(_) => OperatingMode::SignUp,
            PendingSubmission::SignIn(_) => OperatingMode::SignIn,
        }
    }
}

/// Why a submission did not succeed. Shown as a form-level notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The identity service returned an error.
    Service,
    /// Sign-in completed without a session.
    NoSession,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Service => f.write_str("Something went wrong. Please try again."),
            FailureReason::NoSession => f.write_str("Invalid email or password."),
        }
    }
}

/// Raw answer of the identity service, interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionResult {
    SignedUp(UserRef),
    SignedIn(SessionRef),
    Failure(FailureReason),
}

/// Why `submit` refused to contact the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    ValidationFailed,
    AlreadySubmitting,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::ValidationFailed => "validation_failed",
            RejectReason::AlreadySubmitting => "already_submitting",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a call to `submit` ended in.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
    Rejected(RejectReason),
    Navigated { path: String },
    Linked(UserRef),
    Failed(FailureReason),
}

/// Send a pending submission to the identity service.
pub async fn execute<S>(service: &S, submission: PendingSubmission) -> SubmissionResult
where
    S: IdentityService,
{
    let mode = submission.mode();
    tracing::info!(%mode, "submitting auth form");

    match submission {
        PendingSubmission::SignUp(payload) => match service.sign_up(payload).await {
            Ok(user) => SubmissionResult::SignedUp(user),
            Err(e) => {
                tracing::warn!(%mode, error = %e, "sign-up failed");
                SubmissionResult::Failure(FailureReason::Service)
            }
        },
        PendingSubmission::SignIn(credentials) => match service.sign_in(credentials).await {
            Ok(Some(session)) => SubmissionResult::SignedIn(session),
            Ok(None) => {
                tracing::warn!(%mode, "sign-in returned no session");
                SubmissionResult::Failure(FailureReason::NoSession)
            }
            Err(e) => {
                tracing::warn!(%mode, error = %e, "sign-in failed");
                SubmissionResult::Failure(FailureReason::Service)
            }
        },
    }
}

/// Apply a submission result to the form.
///
/// Navigation is left to [`follow`] so the caller can release its hold on the state
/// before the navigator runs.
pub fn settle(state: &mut FormState, result: SubmissionResult) -> SubmissionOutcome {
    state.is_submitting = false;

    let outcome = match result {
        SubmissionResult::SignedUp(user) => {
            state.linked_user = Some(user.clone());
            SubmissionOutcome::Linked(user)
        }
        SubmissionResult::SignedIn(_) => SubmissionOutcome::Navigated {
            path: ROOT_PATH.to_string(),
        },
        SubmissionResult::Failure(reason) => {
            state.submission_error = Some(reason);
            SubmissionOutcome::Failed(reason)
        }
    };

    tracing::info!(mode = %state.mode(), ?outcome, "auth form submission settled");
    outcome
}

/// Fire the navigation intent of a settled submission, if it has one.
pub fn follow<N>(outcome: &SubmissionOutcome, navigator: &N)
where
    N: Navigator,
{
    if let SubmissionOutcome::Navigated { path } = outcome {
        navigator.navigate(path);
    }
}
