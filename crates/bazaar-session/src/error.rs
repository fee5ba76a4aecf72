//! Error types for the session layer.

use bazaar_record::RecordError;
use bazaar_store::StoreError;

/// Errors that can occur during session management.
///
/// Reading a session never fails: absence, expiry and corruption all come
/// back as `None`. These errors come from signing in and from writes.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend rejected the login. The message is the backend's own,
    /// passed through untouched for the login screen to show.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The backend accepted the login but its payload can't be a session
    /// record (not an object, or a malformed `expiryTime`).
    #[error("invalid session payload: {0}")]
    InvalidPayload(#[from] RecordError),

    /// Persisting the session failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
