//! The login form's submit handler.
//!
//! The flow is:
//!   1. Hand the credentials to the [`Authenticator`] (the backend call)
//!   2. On rejection → surface the backend's message, leave the session alone
//!   3. On success → start the session, which broadcasts `LoggedIn`
//!   4. Forward to the view the visitor was bounced from

use bazaar_guard::{Navigation, Router};
use bazaar_record::Codec;
use bazaar_session::{Authenticator, Credentials};

use crate::BazaarError;

/// Signs visitors in through an [`Authenticator`].
pub struct LoginFlow<A: Authenticator> {
    authenticator: A,
}

impl<A: Authenticator> LoginFlow<A> {
    pub fn new(authenticator: A) -> Self {
        Self { authenticator }
    }

    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Submits the login form.
    ///
    /// Returns the navigation that followed the login: back to the
    /// captured origin, or to the landing view.
    ///
    /// # Errors
    /// - [`BazaarError::Session`] wrapping `AuthFailed(message)` if the
    ///   backend rejected the credentials. `message` is the backend's own
    ///   text; no session is written and the router doesn't move.
    /// - [`BazaarError::Session`] if the session couldn't be persisted.
    pub async fn submit<C: Codec>(
        &self,
        router: &mut Router<C>,
        credentials: &Credentials,
    ) -> Result<Navigation, BazaarError> {
        tracing::info!(role = %credentials.role, email = %credentials.email, "login submitted");

        let payload = match self.authenticator.authenticate(credentials).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(role = %credentials.role, error = %e, "login rejected");
                return Err(e.into());
            }
        };

        router.manager().login(payload)?;
        Ok(router.complete_login())
    }
}
