//! The form's collaborators, backed by the `api` server functions and the browser.

use forms::{
    IdentityService, Navigator, ServiceError, SessionRef, SignInPayload, SignUpPayload, UserRef,
};

/// [`IdentityService`] that calls the `api` crate's server functions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiIdentity;

impl IdentityService for ApiIdentity {
    async fn sign_up(&self, payload: SignUpPayload) -> Result<UserRef, ServiceError> {
        api::sign_up(payload)
            .await
            .map_err(|e| ServiceError::Rejected(e.to_string()))
    }

    async fn sign_in(
        &self,
        credentials: SignInPayload,
    ) -> Result<Option<SessionRef>, ServiceError> {
        api::sign_in(credentials)
            .await
            .map_err(|e| ServiceError::Rejected(e.to_string()))
    }
}

/// [`Navigator`] that loads the target path in the current browser window.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(path) {
                    tracing::error!("Failed to navigate to {}: {:?}", path, e);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("Navigation to {} requested outside the browser", path);
        }
    }
}
