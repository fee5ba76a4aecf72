//! Sliding expiry: how long a session stays valid.
//!
//! The window is fixed at ten days from the last login or refresh. There
//! is no server-side token refresh; "refresh" just pushes the local expiry
//! further out.

use std::time::Duration;

use bazaar_record::{EpochMillis, SessionRecord};

/// Length of the sliding window.
pub const FIXED_WINDOW: Duration = Duration::from_secs(10 * 24 * 60 * 60);

/// Pure expiry rules. No state, no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryPolicy;

impl ExpiryPolicy {
    /// The expiry for a session created or refreshed at `now`.
    pub fn compute_expiry(now: EpochMillis) -> EpochMillis {
        now.offset(FIXED_WINDOW.as_millis() as i64)
    }

    /// `true` iff the record has an expiry and `now` is strictly past it.
    ///
    /// A record without an expiry hasn't been decorated yet and is not
    /// expired. At exactly `now == expiry` the record is still valid.
    pub fn is_expired(record: &SessionRecord, now: EpochMillis) -> bool {
        record.expiry.is_some_and(|expiry| now > expiry)
    }

    /// Time left before the record expires, or `None` if it has no expiry
    /// or is already expired.
    pub fn remaining(record: &SessionRecord, now: EpochMillis) -> Option<Duration> {
        let expiry = record.expiry?;
        let left = expiry.0.checked_sub(now.0)?;
        u64::try_from(left).ok().map(Duration::from_millis)
    }
}
