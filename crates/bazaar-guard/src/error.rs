//! Error types for the navigation layer.

use bazaar_session::SessionError;

/// Errors that can occur while navigating.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// The navigation target isn't an absolute path (`/Services?id=3`).
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// Clearing the session on logout failed. The router has still moved
    /// to the login view.
    #[error(transparent)]
    Session(#[from] SessionError),
}
