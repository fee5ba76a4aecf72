use bazaar_record::RecordError;

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A tier failed to read, write, or remove an entry.
    /// Only the file-backed tier can produce this.
    #[error("{tier} tier I/O failed: {source}")]
    Io {
        /// Name of the tier that failed (`"ephemeral"`, `"durable"`, ...).
        tier: String,
        #[source]
        source: std::io::Error,
    },

    /// The record couldn't be encoded before writing.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl StoreError {
    pub(crate) fn io(tier: &str, source: std::io::Error) -> Self {
        Self::Io {
            tier: tier.to_string(),
            source,
        }
    }
}
