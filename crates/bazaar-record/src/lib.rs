//! Session record model for Bazaar.
//!
//! This crate defines WHAT gets persisted when a visitor signs in to the
//! marketplace:
//!
//! - **Types** ([`SessionRecord`], [`EpochMillis`], [`Identity`]) — the
//!   record itself and its expiry instant.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how records are converted
//!   to and from bytes.
//! - **Errors** ([`RecordError`]) — what can go wrong doing so.
//!
//! # Architecture
//!
//! ```text
//! Store (bytes in tiers) → Record (SessionRecord) → Session (lifecycle)
//! ```
//!
//! The record layer knows nothing about storage tiers or expiry policy.

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::RecordError;
pub use types::{EXPIRY_FIELD, EpochMillis, Identity, SessionRecord};
