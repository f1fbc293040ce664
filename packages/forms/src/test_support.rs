use std::cell::{Cell, RefCell};

use futures::channel::oneshot;

use crate::service::{
    IdentityService, Navigator, ServiceError, SessionRef, SignInPayload, SignUpPayload, UserRef,
};

/// Identity service spy with canned answers.
///
/// A gate installed with [`StubService::gate`] holds the next call until the paired
/// sender fires (or is dropped), which keeps a submission in flight for a test.
pub(crate) struct StubService {
    sign_up_result: Result<UserRef, ServiceError>,
    sign_in_result: Result<Option<SessionRef>, ServiceError>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    sign_up_calls: Cell<usize>,
    sign_in_calls: Cell<usize>,
    last_sign_up: RefCell<Option<SignUpPayload>>,
    last_sign_in: RefCell<Option<SignInPayload>>,
}

impl Default for StubService {
    fn default() -> Self {
        Self {
            sign_up_result: Err(ServiceError::Unreachable("not stubbed".to_string())),
            sign_in_result: Err(ServiceError::Unreachable("not stubbed".to_string())),
            gate: RefCell::new(None),
            sign_up_calls: Cell::new(0),
            sign_in_calls: Cell::new(0),
            last_sign_up: RefCell::new(None),
            last_sign_in: RefCell::new(None),
        }
    }
}

impl StubService {
    pub(crate) fn sign_up_with(result: Result<UserRef, ServiceError>) -> Self {
        Self {
            sign_up_result: result,
            ..Self::default()
        }
    }

    pub(crate) fn sign_in_with(result: Result<Option<SessionRef>, ServiceError>) -> Self {
        Self {
            sign_in_result: result,
            ..Self::default()
        }
    }

    /// Hold the next call until the returned sender fires.
    pub(crate) fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub(crate) fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.get()
    }

    pub(crate) fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.get()
    }

    pub(crate) fn last_sign_up(&self) -> Option<SignUpPayload> {
        self.last_sign_up.borrow().clone()
    }

    pub(crate) fn last_sign_in(&self) -> Option<SignInPayload> {
        self.last_sign_in.borrow().clone()
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

impl IdentityService for StubService {
    async fn sign_up(&self, payload: SignUpPayload) -> Result<UserRef, ServiceError> {
        self.sign_up_calls.set(self.sign_up_calls.get() + 1);
        *self.last_sign_up.borrow_mut() = Some(payload);
        self.wait_for_gate().await;
        self.sign_up_result.clone()
    }

    async fn sign_in(&self, credentials: SignInPayload) -> Result<Option<SessionRef>, ServiceError> {
        self.sign_in_calls.set(self.sign_in_calls.get() + 1);
        *self.last_sign_in.borrow_mut() = Some(credentials);
        self.wait_for_gate().await;
        self.sign_in_result.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    paths: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_string());
    }
}
