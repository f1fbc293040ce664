//! # Forms crate: sign-in and sign-up form logic for Horizon
//!
//! Everything the authentication form does apart from drawing itself: picking the
//! field schema for a mode, validating input, and running a submission against the
//! identity service. The crate has no UI or network dependency; the `ui` crate renders
//! it with Dioxus and the `api` crate provides the identity service.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`mode`] | [`OperatingMode`]: `sign-in` or `sign-up` |
//! | [`schema`] | [`schema_for`], field names, constraints and per-field validation |
//! | [`state`] | [`FormState`]: values, field errors, submission flags, linked user |
//! | [`binding`] | [`FieldBinding`]: what a renderer needs for one input |
//! | [`service`] | [`IdentityService`] and [`Navigator`] seams, payloads and references |
//! | [`orchestrator`] | [`execute`](orchestrator::execute), [`settle`](orchestrator::settle) and [`follow`](orchestrator::follow) a submission |
//! | [`controller`] | [`FormController`]: a form instance wired to its collaborators |
//!
//! ## Submission lifecycle
//!
//! ```text
//! Idle ──validate fails──▶ Idle (field errors shown)
//! Idle ──submit──▶ Submitting ──▶ Idle + submission error
//!                             ├─▶ Linking (sign-up)
//!                             └─▶ navigated to "/" (sign-in)
//! ```
//!
//! A second submit while one is in flight is rejected without calling the service,
//! and `is_submitting` is cleared on every path out of `Submitting`, including a
//! [`FormController::submit`] future dropped before it settles.

pub mod binding;
pub mod controller;
pub mod mode;
pub mod orchestrator;
pub mod schema;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;

pub use binding::FieldBinding;
pub use controller::FormController;
pub use mode::OperatingMode;
pub use orchestrator::{
    FailureReason, PendingSubmission, RejectReason, SubmissionOutcome, SubmissionResult,
};
pub use schema::{
    schema_for, FieldConstraint, FieldError, FieldKind, FieldName, FieldSchema, FieldSpec,
    ValidationResult,
};
pub use service::{
    IdentityService, Navigator, ServiceError, SessionRef, SignInPayload, SignUpPayload, UserRef,
};
pub use state::{FormState, Presentation};
