//! The navigation bar and its login/logout button.
//!
//! The nav bar sits outside every page, so it learns about logins and
//! logouts from the broadcaster. An event only marks it stale; what it
//! shows always comes from asking the session manager at render time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bazaar_record::{Codec, JsonCodec};
use bazaar_session::{SessionManager, Subscription};

/// The auth control in the nav bar. Both variants lead to the login view;
/// `Logout` ends the session first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthButton {
    Login,
    Logout,
}

impl AuthButton {
    /// The button for the given auth state.
    pub fn for_state(authenticated: bool) -> Self {
        if authenticated { Self::Logout } else { Self::Login }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Logout => "Logout",
        }
    }
}

/// A link in the nav bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

const HOME: NavLink = NavLink { label: "Home", path: "/" };
const VENDOR_PROFILE: NavLink = NavLink { label: "Vendor Profile", path: "/VendorProfile" };
const MY_ACCOUNT: NavLink = NavLink { label: "My Account", path: "/profile" };

/// One rendering of the nav bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub links: Vec<NavLink>,
    pub button: AuthButton,
}

impl NavView {
    /// `true` if the "My Account" link is showing.
    pub fn shows_account(&self) -> bool {
        self.links.contains(&MY_ACCOUNT)
    }
}

/// Nav bar state for one browsing context.
///
/// Subscribed for as long as it lives; dropping it unsubscribes.
pub struct NavBar<C: Codec = JsonCodec> {
    manager: Arc<SessionManager<C>>,
    stale: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl<C: Codec> NavBar<C> {
    /// Creates a nav bar and subscribes it to auth events.
    pub fn new(manager: Arc<SessionManager<C>>) -> Self {
        let stale = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&stale);
        let subscription = manager.broadcaster().subscribe(move |event| {
            tracing::trace!(%event, "nav bar marked stale");
            flag.store(true, Ordering::SeqCst);
        });

        Self {
            manager,
            stale,
            _subscription: subscription,
        }
    }

    /// `true` if an auth event arrived since the last render.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Renders from the current session state and clears the stale flag.
    pub fn render(&self) -> NavView {
        // Reading may discover expiry and broadcast `LoggedOut`, which
        // marks the bar stale; clear the flag only after the read.
        let authenticated = self.manager.is_authenticated();
        self.stale.store(false, Ordering::SeqCst);

        let mut links = vec![HOME, VENDOR_PROFILE];
        if authenticated {
            links.push(MY_ACCOUNT);
        }

        NavView {
            links,
            button: AuthButton::for_state(authenticated),
        }
    }
}
