//! Error types for the record layer.
//!
//! Each crate in Bazaar defines its own error enum. A `RecordError` always
//! means the problem is in turning a session record into bytes or back,
//! never in storage or routing.

/// Errors that can occur while encoding, decoding, or building a
/// [`SessionRecord`](crate::SessionRecord).
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Serialization failed (record to bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (bytes to record).
    ///
    /// Common causes: truncated JSON, a value that is not an object, or an
    /// `expiryTime` that is not an integer. The store treats this as a
    /// corrupt entry.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload parsed but cannot be a session record, e.g. the
    /// backend returned an array where an object was expected.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
