//! Storage abstraction layer for Bazaar sessions.
//!
//! Provides the [`StorageTier`] trait that abstracts over where a session
//! record's bytes live, two tier implementations, and the
//! [`SessionStore`] that keeps an ephemeral and a durable tier in step.
//!
//! # Tiers
//!
//! - [`MemoryTier`] — in-process map. Used as the ephemeral tier (scoped to
//!   one browsing context) and as a durable fake in tests. Clones share
//!   the same map, which is how two contexts share durable storage.
//! - [`FileTier`] — one file per key in a directory. Survives process
//!   restarts, so it backs the durable tier in a real client.

mod error;
mod file;
mod memory;
mod store;

pub use error::StoreError;
pub use file::FileTier;
pub use memory::MemoryTier;
pub use store::{DEFAULT_STORAGE_KEY, SessionStore, StoreConfig};

/// A key/value storage tier holding raw bytes.
///
/// Methods take `&self`: tiers are shared, process-wide state, so
/// implementations use interior mutability. There is no locking protocol
/// across tiers; the last writer wins.
pub trait StorageTier: Send + Sync + 'static {
    /// A short name used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the bytes stored under `key`, or `Ok(None)` if there are none.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
