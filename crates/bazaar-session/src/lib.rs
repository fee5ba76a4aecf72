//! Session lifecycle management for Bazaar.
//!
//! This crate decides, at any moment, whether the visitor is signed in:
//!
//! 1. **Expiry** — a fixed ten-day sliding window ([`ExpiryPolicy`])
//! 2. **Session tracking** — create, read, refresh, update and clear the
//!    one persisted record ([`SessionManager`])
//! 3. **Notification** — telling decoupled UI regions about login/logout
//!    ([`AuthBroadcaster`])
//! 4. **Authentication** — the hook for the remote login call
//!    ([`Authenticator`] trait, [`LoginResponse`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard Layer (above)    ← asks "may this visitor see this page?"
//!     ↕
//! Session Layer (this crate)  ← owns the session's lifecycle
//!     ↕
//! Store Layer (below)    ← keeps the record in two storage tiers
//! ```

mod auth;
mod broadcast;
mod clock;
mod error;
mod expiry;
mod manager;

pub use auth::{AccountRole, Authenticator, Credentials, GENERIC_LOGIN_FAILURE, LoginResponse};
pub use broadcast::{AuthBroadcaster, AuthEvent, Subscription};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use expiry::{ExpiryPolicy, FIXED_WINDOW};
pub use manager::SessionManager;
