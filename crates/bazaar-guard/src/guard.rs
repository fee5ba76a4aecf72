//! The route guard: the check wrapped around every protected view.

use std::sync::Arc;

use bazaar_record::{Codec, JsonCodec, SessionRecord};
use bazaar_session::SessionManager;

use crate::{AuthState, Location};

/// What the guard decided for one navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// The visitor is signed in. Carries the session after the refresh.
    Render(SessionRecord),
    /// The visitor isn't signed in. `from` is the location they asked for,
    /// to be restored once they log in.
    Redirect { to: Location, from: Location },
}

impl GuardOutcome {
    /// The settled auth state behind this outcome.
    pub fn auth_state(&self) -> AuthState {
        match self {
            Self::Render(_) => AuthState::Authenticated,
            Self::Redirect { .. } => AuthState::Unauthenticated,
        }
    }
}

/// Gates protected views on a valid session.
///
/// Every pass through the guard is also activity: a signed-in visitor gets
/// their expiry slid forward before the view renders.
pub struct RouteGuard<C: Codec = JsonCodec> {
    manager: Arc<SessionManager<C>>,
    login: Location,
}

impl<C: Codec> RouteGuard<C> {
    /// Creates a guard that sends unauthenticated visitors to `login_path`.
    pub fn new(manager: Arc<SessionManager<C>>, login_path: impl Into<String>) -> Self {
        Self {
            manager,
            login: Location::new(login_path),
        }
    }

    /// The login view redirects point at.
    pub fn login(&self) -> &Location {
        &self.login
    }

    /// Checks a navigation into a protected view.
    ///
    /// A failed refresh doesn't block the view: the session was valid when
    /// checked, so the view renders with the unrefreshed record.
    pub fn check(&self, requested: &Location) -> GuardOutcome {
        let Some(session) = self.manager.get_session() else {
            return self.redirect(requested);
        };

        match self.manager.refresh() {
            Ok(Some(refreshed)) => GuardOutcome::Render(refreshed),
            // Expired between the check and the refresh.
            Ok(None) => self.redirect(requested),
            Err(e) => {
                tracing::warn!(location = %requested, error = %e, "session refresh failed");
                GuardOutcome::Render(session)
            }
        }
    }

    fn redirect(&self, requested: &Location) -> GuardOutcome {
        tracing::info!(from = %requested, to = %self.login, "not signed in, redirecting");
        GuardOutcome::Redirect {
            to: self.login.clone(),
            from: requested.clone(),
        }
    }
}
