//! Route guarding and navigation for Bazaar.
//!
//! Decides what a visitor gets to see, based on the session layer's answer
//! to "is anyone signed in?".
//!
//! # Key types
//!
//! - [`RouteGuard`] — the check wrapped around every protected view
//! - [`Router`] — route table, current location, forwarding intent
//! - [`NavBar`] / [`AuthButton`] — auth-aware navigation chrome
//! - [`RouterConfig`] — login and landing paths

mod config;
mod error;
mod guard;
mod location;
mod nav;
mod router;

pub use config::{AuthState, DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH, RouteAccess, RouterConfig};
pub use error::GuardError;
pub use guard::{GuardOutcome, RouteGuard};
pub use location::Location;
pub use nav::{AuthButton, NavBar, NavLink, NavView};
pub use router::{Navigation, Router};
