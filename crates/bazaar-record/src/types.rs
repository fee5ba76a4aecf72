//! The session record: the one entity Bazaar persists.
//!
//! A record answers "who is currently signed in, and until when". The
//! "who" part is opaque: whatever identity fields the marketplace backend
//! returned at login (vendor id, display name, email, phone, role-specific
//! unique id). Bazaar never validates them. The "until when" part is the
//! expiry timestamp, which Bazaar owns.
//!
//! On the wire (and in storage) a record is one flat JSON object:
//!
//! ```text
//! { "vendor_id": 17, "vendor_name": "Royal Dhol", "expiryTime": 1700864000000 }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::RecordError;

/// Name of the expiry field inside the persisted JSON object.
pub const EXPIRY_FIELD: &str = "expiryTime";

/// Opaque identity attributes, keyed by the backend's field names.
pub type Identity = Map<String, Value>;

// ---------------------------------------------------------------------------
// EpochMillis
// ---------------------------------------------------------------------------

/// An absolute instant as milliseconds since the Unix epoch.
///
/// Newtype over `i64` so an expiry can't be confused with a duration or a
/// record id. `#[serde(transparent)]` keeps it a plain number in JSON.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpochMillis(pub i64);

impl EpochMillis {
    /// Returns this instant shifted by `millis` (negative moves backwards).
    /// Saturates instead of overflowing.
    pub fn offset(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// A persisted session: opaque identity fields plus lifecycle metadata.
///
/// `expiry` is `None` only for a record that hasn't been decorated yet
/// (a raw login payload). Everything written by the session manager has
/// one.
///
/// `#[serde(flatten)]` folds the identity map into the top-level object, so
/// the record serializes as the flat shape shown in the module docs rather
/// than `{ "identity": {...}, "expiryTime": ... }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(flatten)]
    identity: Identity,

    /// When this record stops being valid.
    #[serde(
        rename = "expiryTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry: Option<EpochMillis>,
}

impl SessionRecord {
    /// Builds an undecorated record from identity fields.
    ///
    /// An `expiryTime` entry inside `identity` is dropped; expiry is only
    /// set through [`SessionRecord::expiry`].
    pub fn from_identity(mut identity: Identity) -> Self {
        identity.remove(EXPIRY_FIELD);
        Self {
            identity,
            expiry: None,
        }
    }

    /// Builds a record from a raw backend payload.
    ///
    /// If the payload already carries an integer `expiryTime`, it is kept.
    ///
    /// # Errors
    /// - [`RecordError::InvalidRecord`] if the payload isn't a JSON object
    /// - [`RecordError::Decode`] if `expiryTime` is present but not an integer
    pub fn from_value(payload: Value) -> Result<Self, RecordError> {
        if !payload.is_object() {
            return Err(RecordError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                kind_of(&payload)
            )));
        }
        serde_json::from_value(payload).map_err(RecordError::Decode)
    }

    /// The opaque identity fields.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Looks up one identity field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.identity.get(name)
    }

    /// Sets one identity field. Setting `expiryTime` this way is ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) {
        if name == EXPIRY_FIELD {
            return;
        }
        self.identity.insert(name.to_string(), value.into());
    }

    /// Merges `patch` into the identity fields, overwriting existing keys.
    ///
    /// The expiry is left untouched, even if `patch` contains an
    /// `expiryTime` key.
    pub fn merge(&mut self, patch: Identity) {
        for (name, value) in patch {
            if name != EXPIRY_FIELD {
                self.identity.insert(name, value);
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Tests for the record shape. The persisted JSON must stay compatible
    //! with what the web client kept under `userData`.

    use serde_json::json;

    use super::*;

    fn vendor() -> SessionRecord {
        SessionRecord::from_value(json!({
            "vendor_id": 17,
            "vendor_name": "Royal Dhol",
            "vendor_email": "royal@example.com",
        }))
        .unwrap()
    }

    // =====================================================================
    // EpochMillis
    // =====================================================================

    #[test]
    fn test_epoch_millis_serializes_as_plain_number() {
        let json = serde_json::to_string(&EpochMillis(1_700_000_000_000)).unwrap();
        assert_eq!(json, "1700000000000");
    }

    #[test]
    fn test_epoch_millis_offset_saturates() {
        assert_eq!(EpochMillis(10).offset(-11), EpochMillis(-1));
        assert_eq!(EpochMillis(i64::MAX).offset(1), EpochMillis(i64::MAX));
    }

    #[test]
    fn test_epoch_millis_display() {
        assert_eq!(EpochMillis(5).to_string(), "5ms");
    }

    // =====================================================================
    // from_value()
    // =====================================================================

    #[test]
    fn test_from_value_object_without_expiry_is_undecorated() {
        let record = vendor();
        assert_eq!(record.expiry, None);
        assert_eq!(record.field("vendor_id"), Some(&json!(17)));
    }

    #[test]
    fn test_from_value_keeps_server_supplied_expiry() {
        let record = SessionRecord::from_value(json!({
            "user_id": 3,
            "expiryTime": 1234,
        }))
        .unwrap();

        assert_eq!(record.expiry, Some(EpochMillis(1234)));
        // The expiry is lifted out of the identity map.
        assert!(record.field(EXPIRY_FIELD).is_none());
    }

    #[test]
    fn test_from_value_array_returns_invalid_record() {
        let result = SessionRecord::from_value(json!([1, 2, 3]));
        assert!(
            matches!(result, Err(RecordError::InvalidRecord(ref msg)) if msg.contains("array"))
        );
    }

    #[test]
    fn test_from_value_string_expiry_returns_decode_error() {
        let result = SessionRecord::from_value(json!({ "expiryTime": "soon" }));
        assert!(matches!(result, Err(RecordError::Decode(_))));
    }

    // =====================================================================
    // Field access and merge
    // =====================================================================

    #[test]
    fn test_from_identity_drops_expiry_key() {
        let mut identity = Identity::new();
        identity.insert("user_id".into(), json!(9));
        identity.insert(EXPIRY_FIELD.into(), json!(99));

        let record = SessionRecord::from_identity(identity);

        assert_eq!(record.expiry, None);
        assert!(record.field(EXPIRY_FIELD).is_none());
    }

    #[test]
    fn test_set_field_ignores_expiry_key() {
        let mut record = vendor();
        record.set_field(EXPIRY_FIELD, 1);
        assert!(record.field(EXPIRY_FIELD).is_none());
        assert_eq!(record.expiry, None);
    }

    #[test]
    fn test_merge_overwrites_and_adds_fields() {
        let mut record = vendor();
        let mut patch = Identity::new();
        patch.insert("vendor_name".into(), json!("Royal Dhol & Band"));
        patch.insert("vendor_phone".into(), json!("555-0100"));

        record.merge(patch);

        assert_eq!(record.field("vendor_name"), Some(&json!("Royal Dhol & Band")));
        assert_eq!(record.field("vendor_phone"), Some(&json!("555-0100")));
        assert_eq!(record.field("vendor_id"), Some(&json!(17)));
    }

    #[test]
    fn test_merge_never_touches_expiry() {
        let mut record = vendor();
        record.expiry = Some(EpochMillis(500));
        let mut patch = Identity::new();
        patch.insert(EXPIRY_FIELD.into(), json!(999_999));

        record.merge(patch);

        assert_eq!(record.expiry, Some(EpochMillis(500)));
    }

    // =====================================================================
    // JSON shape
    // =====================================================================

    #[test]
    fn test_record_serializes_flat() {
        let mut record = vendor();
        record.expiry = Some(EpochMillis(77));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            json!({
                "vendor_id": 17,
                "vendor_name": "Royal Dhol",
                "vendor_email": "royal@example.com",
                "expiryTime": 77,
            })
        );
    }

    #[test]
    fn test_undecorated_record_omits_expiry_time() {
        let json = serde_json::to_value(vendor()).unwrap();
        assert!(json.get(EXPIRY_FIELD).is_none());
    }
}
