//! Unified error type for Bazaar.

use bazaar_guard::GuardError;
use bazaar_record::RecordError;
use bazaar_session::SessionError;
use bazaar_store::StoreError;

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors, so code
/// using the `bazaar` meta-crate only handles this one type.
#[derive(Debug, thiserror::Error)]
pub enum BazaarError {
    /// A record couldn't be encoded or decoded.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A storage tier failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Login was rejected, or the session couldn't be written.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A navigation target or configured path is invalid.
    #[error(transparent)]
    Guard(#[from] GuardError),
}

impl BazaarError {
    /// The backend's message if this is a rejected login.
    pub fn auth_failure(&self) -> Option<&str> {
        match self {
            Self::Session(SessionError::AuthFailed(message)) => Some(message),
            _ => None,
        }
    }
}
