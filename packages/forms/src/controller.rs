//! Form controller: one form instance wired to its collaborators.

use std::cell::{Ref, RefCell};

use crate::mode::OperatingMode;
use crate::orchestrator::{self, SubmissionOutcome};
use crate::schema::{FieldName, ValidationResult};
use crate::service::{IdentityService, Navigator};
use crate::state::FormState;

/// Owns a [`FormState`] and runs submissions against an identity service.
///
/// Methods take `&self`: edits and a second `submit` are allowed while a submission
/// is pending, and the state is never borrowed across the service call. Dropping a
/// pending `submit` future leaves the form submittable again.
pub struct FormController<S, N> {
    state: RefCell<FormState>,
    service: S,
    navigator: N,
}

impl<S, N> FormController<S, N>
where
    S: IdentityService,
    N: Navigator,
{
    pub fn new(mode: OperatingMode, service: S, navigator: N) -> Self {
        Self {
            state: RefCell::new(FormState::new(mode)),
            service,
            navigator,
        }
    }

    pub fn state(&self) -> Ref<'_, FormState> {
        self.state.borrow()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn set_field(&self, name: FieldName, raw: impl Into<String>) {
        self.state.borrow_mut().set_field(name, raw);
    }

    pub fn validate(&self) -> ValidationResult {
        self.state.borrow_mut().validate()
    }

    /// Validate and submit. The service is only called for a valid form with no
    /// other submission in flight.
    pub async fn submit(&self) -> SubmissionOutcome {
        let begun = self.state.borrow_mut().begin_submit();
        let pending = match begun {
            Ok(pending) => pending,
            Err(reason) => {
                tracing::debug!(%reason, "auth form submission rejected");
                return SubmissionOutcome::Rejected(reason);
            }
        };

        let in_flight = InFlight::new(&self.state);
        let result = orchestrator::execute(&self.service, pending).await;
        in_flight.disarm();

        let outcome = orchestrator::settle(&mut self.state.borrow_mut(), result);
        orchestrator::follow(&outcome, &self.navigator);
        outcome
    }
}

/// Clears `is_submitting` if a submission is dropped before it settles.
struct InFlight<'a> {
    state: Option<&'a RefCell<FormState>>,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a RefCell<FormState>) -> Self {
        Self { state: Some(state) }
    }

    fn disarm(mut self) {
        self.state = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let Some(state) = self.state else {
            return;
        };
        match state.try_borrow_mut() {
            Ok(mut state) => {
                tracing::debug!(mode = %state.mode(), "auth form submission dropped before settling");
                state.is_submitting = false;
            }
            Err(_) => tracing::warn!("could not reset an abandoned auth form submission"),
        }
    }
}
