//! Codec trait and implementations for serializing/deserializing records.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The store doesn't care HOW a session record is serialized; it just
//! needs something that implements the [`Codec`] trait.
//!
//! [`JsonCodec`] is the only implementation. It produces the same flat JSON
//! object the marketplace web client kept in browser storage, so records
//! written by either side stay readable.

use serde::{Serialize, de::DeserializeOwned};

use crate::RecordError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → the store holding the codec can be shared behind an
///   `Arc` between the guard, the nav bar and the login flow.
/// - `'static` → the codec owns everything it needs.
///
/// The methods are generic over the value type, so the trait is not
/// object-safe. Holders take it as a type parameter instead
/// (`SessionStore<C: Codec>`).
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `RecordError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, RecordError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `RecordError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, RecordError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use bazaar_record::{Codec, EpochMillis, JsonCodec, SessionRecord};
///
/// let codec = JsonCodec;
///
/// let mut record = SessionRecord::default();
/// record.set_field("vendor_email", "mehndi@example.com");
/// record.expiry = Some(EpochMillis(1_700_000_000_000));
///
/// let bytes = codec.encode(&record).unwrap();
/// let decoded: SessionRecord = codec.decode(&bytes).unwrap();
/// assert_eq!(record, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec(value).map_err(RecordError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, RecordError> {
        serde_json::from_slice(data).map_err(RecordError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpochMillis, SessionRecord};

    #[test]
    fn test_encode_writes_flat_object_with_expiry_time() {
        let mut record = SessionRecord::default();
        record.set_field("vendor_id", 17);
        record.expiry = Some(EpochMillis(42));

        let bytes = JsonCodec.encode(&record).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["vendor_id"], 17);
        assert_eq!(json["expiryTime"], 42);
    }

    #[test]
    fn test_decode_garbage_returns_decode_error() {
        let result: Result<SessionRecord, _> = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(RecordError::Decode(_))));
    }

    #[test]
    fn test_decode_non_object_returns_decode_error() {
        // A bare string is valid JSON but can never be a session record.
        let result: Result<SessionRecord, _> = JsonCodec.decode(br#""userData""#);
        assert!(matches!(result, Err(RecordError::Decode(_))));
    }
}
