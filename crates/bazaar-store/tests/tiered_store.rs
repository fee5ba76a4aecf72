//! Integration tests for `SessionStore` over a real file-backed durable tier.
//!
//! A "browsing context" here is one `SessionStore` with its own fresh
//! `MemoryTier`. Dropping the store and building a new one over the same
//! directory simulates a page reload or a browser restart.

use bazaar_record::{EpochMillis, SessionRecord};
use bazaar_store::{FileTier, MemoryTier, SessionStore, StorageTier, StoreConfig};
use serde_json::json;

fn context(dir: &std::path::Path) -> (SessionStore, MemoryTier, FileTier) {
    let ephemeral = MemoryTier::new("ephemeral");
    let durable = FileTier::new("durable", dir);
    let store = SessionStore::new(ephemeral.clone(), durable.clone(), StoreConfig::default());
    (store, ephemeral, durable)
}

fn dhol_vendor() -> SessionRecord {
    let mut record = SessionRecord::from_value(json!({
        "vendor_id": 41,
        "vendor_name": "Beat Brothers Dhol",
        "vendor_email": "beat@example.com",
        "vendor_phone": "555-0141",
        "vendor_unique_id": "DHOL-0041",
    }))
    .unwrap();
    record.expiry = Some(EpochMillis(1_900_000_000_000));
    record
}

#[test]
fn test_round_trip_preserves_identity_and_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _, _) = context(dir.path());

    store.write(&dhol_vendor()).unwrap();

    let read = store.read().expect("record should be present");
    assert_eq!(read, dhol_vendor());
    assert_eq!(read.expiry, Some(EpochMillis(1_900_000_000_000)));
}

#[test]
fn test_reload_recovers_session_from_durable_tier() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (store, _, _) = context(dir.path());
        store.write(&dhol_vendor()).unwrap();
    } // context closed: ephemeral tier gone

    let (store, ephemeral, _) = context(dir.path());
    assert!(ephemeral.is_empty());

    assert_eq!(store.read(), Some(dhol_vendor()));
    assert!(
        ephemeral.contains("userData"),
        "record should be promoted into the new context's ephemeral tier"
    );
}

#[test]
fn test_corrupt_file_reads_as_absent_and_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let (store, ephemeral, durable) = context(dir.path());
    durable.set("userData", b"{\"vendor_id\": 41,").unwrap();

    assert_eq!(store.read(), None);
    assert!(ephemeral.is_empty());
    assert_eq!(durable.get("userData").unwrap(), None);
    assert!(!durable.path_for("userData").exists());
}

#[test]
fn test_clear_in_one_context_is_seen_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _, _) = context(dir.path());
    store.write(&dhol_vendor()).unwrap();
    store.clear().unwrap();
    drop(store);

    let (store, _, _) = context(dir.path());
    assert_eq!(store.read(), None);
}

#[test]
fn test_durable_file_holds_flat_json() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _, durable) = context(dir.path());

    store.write(&dhol_vendor()).unwrap();

    let bytes = std::fs::read(durable.path_for("userData")).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["vendor_unique_id"], "DHOL-0041");
    assert_eq!(json["expiryTime"], 1_900_000_000_000_i64);
}
