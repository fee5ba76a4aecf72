//! The session store: one record, two tiers.
//!
//! ```text
//!            write ──────┬──────────────┐
//!                        ▼              ▼
//!                  [ephemeral]      [durable]
//!                        │              │
//!   read ──→ hit? ───────┘   miss ──→ hit? ──→ promote into ephemeral
//! ```
//!
//! `SessionStore::write` is the only way a record gets into the tiers, so
//! both tiers always change together.

use bazaar_record::{Codec, JsonCodec, SessionRecord};
use serde::{Deserialize, Serialize};

use crate::{StorageTier, StoreError};

/// The well-known key the marketplace client has always stored sessions under.
pub const DEFAULT_STORAGE_KEY: &str = "userData";

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The single key a record lives under in each tier. One key means one
    /// account: a second login overwrites the first.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Persists one [`SessionRecord`] across an ephemeral and a durable tier.
///
/// Absence is a normal outcome: [`read`](Self::read) returns `Option`, and
/// a corrupt entry reads as `None` (after both tiers are wiped).
pub struct SessionStore<C: Codec = JsonCodec> {
    ephemeral: Box<dyn StorageTier>,
    durable: Box<dyn StorageTier>,
    key: String,
    codec: C,
}

impl SessionStore<JsonCodec> {
    /// Creates a JSON-encoded store over the given tiers.
    pub fn new(
        ephemeral: impl StorageTier,
        durable: impl StorageTier,
        config: StoreConfig,
    ) -> Self {
        Self::with_codec(ephemeral, durable, config, JsonCodec)
    }
}

impl<C: Codec> SessionStore<C> {
    /// Creates a store with a custom codec.
    pub fn with_codec(
        ephemeral: impl StorageTier,
        durable: impl StorageTier,
        config: StoreConfig,
        codec: C,
    ) -> Self {
        Self {
            ephemeral: Box::new(ephemeral),
            durable: Box::new(durable),
            key: config.key,
            codec,
        }
    }

    /// The key records are stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Direct access to the ephemeral tier.
    pub fn ephemeral(&self) -> &dyn StorageTier {
        self.ephemeral.as_ref()
    }

    /// Direct access to the durable tier.
    pub fn durable(&self) -> &dyn StorageTier {
        self.durable.as_ref()
    }

    /// Serializes `record` and stores it in both tiers.
    ///
    /// If the durable write fails, the ephemeral tier is put back the way
    /// it was before returning the error, so no reader ever sees the new
    /// record in one tier only.
    ///
    /// # Errors
    /// - [`StoreError::Record`] if the record can't be encoded (nothing is written)
    /// - [`StoreError::Io`] if a tier write fails
    pub fn write(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let bytes = self.codec.encode(record)?;

        let previous = self.ephemeral.get(&self.key).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not snapshot ephemeral tier before write");
            None
        });

        self.ephemeral.set(&self.key, &bytes)?;

        if let Err(err) = self.durable.set(&self.key, &bytes) {
            tracing::warn!(
                key = %self.key,
                error = %err,
                "durable write failed, rolling back ephemeral tier"
            );
            let restored = match previous {
                Some(prev) => self.ephemeral.set(&self.key, &prev),
                None => self.ephemeral.remove(&self.key),
            };
            if let Err(e) = restored {
                tracing::warn!(error = %e, "ephemeral rollback failed");
            }
            return Err(err);
        }

        tracing::debug!(key = %self.key, bytes = bytes.len(), "session record written");
        Ok(())
    }

    /// Reads the record, ephemeral tier first.
    ///
    /// - Ephemeral hit → decode and return.
    /// - Ephemeral miss, durable hit → decode, copy the bytes into the
    ///   ephemeral tier, return.
    /// - Bytes that don't decode → clear both tiers, return `None`.
    ///
    /// A tier that fails to answer is treated as a miss.
    pub fn read(&self) -> Option<SessionRecord> {
        let (bytes, from_durable) = match self.fetch(self.ephemeral.as_ref()) {
            Some(bytes) => (bytes, false),
            None => (self.fetch(self.durable.as_ref())?, true),
        };

        let record: SessionRecord = match self.codec.decode(&bytes) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "corrupt session record, clearing both tiers"
                );
                if let Err(e) = self.clear() {
                    tracing::warn!(error = %e, "failed to clear corrupt session record");
                }
                return None;
            }
        };

        if from_durable {
            match self.ephemeral.set(&self.key, &bytes) {
                Ok(()) => {
                    tracing::debug!(key = %self.key, "promoted session record into ephemeral tier")
                }
                Err(e) => tracing::warn!(error = %e, "promotion into ephemeral tier failed"),
            }
        }

        Some(record)
    }

    /// Removes the record from both tiers. Idempotent.
    ///
    /// Both tiers are always attempted; the first failure is returned.
    pub fn clear(&self) -> Result<(), StoreError> {
        let ephemeral = self.ephemeral.remove(&self.key);
        let durable = self.durable.remove(&self.key);
        tracing::debug!(key = %self.key, "session record cleared");
        ephemeral.and(durable)
    }

    fn fetch(&self, tier: &dyn StorageTier) -> Option<Vec<u8>> {
        match tier.get(&self.key) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    tier = tier.name(),
                    error = %e,
                    "tier read failed, treating as miss"
                );
                None
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
