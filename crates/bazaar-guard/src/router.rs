//! The router: where the visitor is, and where they go next.
//!
//! It owns the route table and the one-shot forwarding intent. When a
//! visitor is bounced to the login view, the location they asked for is
//! remembered exactly once; a completed login consumes it.

use std::collections::HashMap;
use std::sync::Arc;

use bazaar_record::{Codec, JsonCodec, SessionRecord};
use bazaar_session::SessionManager;

use crate::{AuthState, GuardError, GuardOutcome, Location, RouteAccess, RouteGuard, RouterConfig};

/// The result of one navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The view at `location` is showing. `session` is set for protected
    /// views (the refreshed record).
    Rendered {
        location: Location,
        session: Option<SessionRecord>,
    },
    /// The visitor asked for `from` but was sent to `to`.
    Redirected { from: Location, to: Location },
}

impl Navigation {
    /// Where the visitor ended up.
    pub fn location(&self) -> &Location {
        match self {
            Self::Rendered { location, .. } => location,
            Self::Redirected { to, .. } => to,
        }
    }
}

/// Navigation state for one browsing context.
pub struct Router<C: Codec = JsonCodec> {
    manager: Arc<SessionManager<C>>,
    guard: RouteGuard<C>,
    config: RouterConfig,
    routes: HashMap<String, RouteAccess>,
    current: Option<Location>,
    pending_origin: Option<Location>,
    auth_state: AuthState,
}

impl<C: Codec> Router<C> {
    /// Creates a router with an empty route table (everything public).
    pub fn new(manager: Arc<SessionManager<C>>, config: RouterConfig) -> Self {
        let guard = RouteGuard::new(Arc::clone(&manager), config.login_path.clone());
        Self {
            manager,
            guard,
            config,
            routes: HashMap::new(),
            current: None,
            pending_origin: None,
            auth_state: AuthState::Unknown,
        }
    }

    /// Registers `path` with the given access level.
    pub fn route(mut self, path: impl Into<String>, access: RouteAccess) -> Self {
        self.routes.insert(path.into(), access);
        self
    }

    /// Registers every path in `paths` as protected.
    pub fn protect<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.routes.insert(path.into(), RouteAccess::Protected);
        }
        self
    }

    /// Access level for `path`. Unregistered paths are public.
    pub fn access(&self, path: &str) -> RouteAccess {
        self.routes.get(path).copied().unwrap_or_default()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn manager(&self) -> &Arc<SessionManager<C>> {
        &self.manager
    }

    /// The location currently showing, if any navigation happened yet.
    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// The location a completed login will return to.
    pub fn pending_origin(&self) -> Option<&Location> {
        self.pending_origin.as_ref()
    }

    /// Auth state from the most recent guarded navigation.
    pub fn auth_state(&self) -> AuthState {
        self.auth_state
    }

    /// Navigates to `target` (`"/path"` or `"/path?query"`).
    ///
    /// - Protected view: goes through the [`RouteGuard`]. Without a session
    ///   the visitor lands on the login view and `target` becomes the
    ///   forwarding intent.
    /// - Login view while signed in: forwards straight on, the way a
    ///   completed login would.
    /// - Anything else renders as-is.
    ///
    /// # Errors
    /// [`GuardError::InvalidLocation`] if `target` isn't an absolute path.
    pub fn navigate(&mut self, target: &str) -> Result<Navigation, GuardError> {
        let location = Location::parse(target)?;
        Ok(self.go(location))
    }

    /// Leaves the login view after a successful login.
    ///
    /// Consumes the forwarding intent: the visitor returns to the view they
    /// were bounced from, or to the landing view if there was none.
    pub fn complete_login(&mut self) -> Navigation {
        self.forward()
    }

    /// Logs out and shows the login view.
    ///
    /// Any forwarding intent is discarded.
    ///
    /// # Errors
    /// [`GuardError::Session`] if the session couldn't be fully cleared.
    /// The router is on the login view either way.
    pub fn logout(&mut self) -> Result<Navigation, GuardError> {
        let cleared = self.manager.logout();
        self.pending_origin = None;
        self.auth_state = AuthState::Unauthenticated;
        let login = self.guard.login().clone();
        let navigation = self.show(login, None);
        cleared?;
        Ok(navigation)
    }

    fn go(&mut self, location: Location) -> Navigation {
        if location.path == self.config.login_path {
            if self.manager.is_authenticated() {
                tracing::debug!("already signed in, leaving login view");
                return self.forward();
            }
            return self.show(location, None);
        }

        if self.access(&location.path) == RouteAccess::Public {
            return self.show(location, None);
        }

        let outcome = self.guard.check(&location);
        self.auth_state = outcome.auth_state();
        match outcome {
            GuardOutcome::Render(session) => self.show(location, Some(session)),
            GuardOutcome::Redirect { to, from } => {
                self.pending_origin = Some(from.clone());
                self.current = Some(to.clone());
                Navigation::Redirected { from, to }
            }
        }
    }

    /// Takes the forwarding intent (or the landing view) and goes there.
    fn forward(&mut self) -> Navigation {
        let destination = self
            .pending_origin
            .take()
            .filter(|origin| origin.path != self.config.login_path)
            .unwrap_or_else(|| Location::new(self.config.landing_path.clone()));

        if destination.path == self.config.login_path {
            return self.show(destination, None);
        }

        tracing::info!(to = %destination, "forwarding after login");
        self.go(destination)
    }

    fn show(&mut self, location: Location, session: Option<SessionRecord>) -> Navigation {
        tracing::debug!(%location, "rendering view");
        self.current = Some(location.clone());
        Navigation::Rendered { location, session }
    }
}
