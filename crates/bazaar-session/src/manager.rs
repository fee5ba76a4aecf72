//! The session manager: the single source of truth for "who is signed in".
//!
//! Every other part of the client goes through this type. Nothing else
//! touches the storage tiers.
//!
//! It is responsible for:
//! - Decorating a fresh login payload with its expiry and persisting it
//! - Answering "is there a valid session right now?"
//! - Sliding the expiry forward on activity
//! - Merging profile edits into the stored record
//! - Clearing the session and telling the UI about it
//!
//! # Concurrency note
//!
//! Methods take `&self` so the manager can sit behind an `Arc` shared by
//! the router, the nav bar and the login flow. A read-modify-write such as
//! [`refresh`](SessionManager::refresh) is not atomic across threads: the
//! client drives all of these from one event loop, and two contexts
//! sharing the durable tier follow last-writer-wins.

use bazaar_record::{Codec, EpochMillis, Identity, JsonCodec, SessionRecord};
use bazaar_store::SessionStore;

use crate::{AuthBroadcaster, AuthEvent, Clock, ExpiryPolicy, SessionError, SystemClock};

/// Creates, reads, refreshes and destroys the one persisted session.
///
/// ## Lifecycle
///
/// ```text
/// login() ──→ [Authenticated] ──refresh()──→ [Authenticated, expiry + 10d]
///                  │    │
///                  │    └──update_fields()──→ [Authenticated, same expiry]
///                  │
///       logout() / expiry found by get_session()
///                  ▼
///           [Unauthenticated]
/// ```
///
/// There is no timer. Expiry is only noticed when someone reads.
pub struct SessionManager<C: Codec = JsonCodec> {
    store: SessionStore<C>,
    broadcaster: AuthBroadcaster,
    clock: Box<dyn Clock>,
}

impl<C: Codec> SessionManager<C> {
    /// Creates a manager using the system clock.
    pub fn new(store: SessionStore<C>, broadcaster: AuthBroadcaster) -> Self {
        Self::with_clock(store, broadcaster, SystemClock)
    }

    /// Creates a manager with an explicit clock.
    pub fn with_clock(
        store: SessionStore<C>,
        broadcaster: AuthBroadcaster,
        clock: impl Clock,
    ) -> Self {
        Self {
            store,
            broadcaster,
            clock: Box::new(clock),
        }
    }

    /// The broadcaster login/logout events go out on.
    pub fn broadcaster(&self) -> &AuthBroadcaster {
        &self.broadcaster
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &SessionStore<C> {
        &self.store
    }

    /// The manager's idea of "now".
    pub fn now(&self) -> EpochMillis {
        self.clock.now()
    }

    /// Starts a session from a raw login payload.
    ///
    /// If the payload carries no expiry, it gets `now + 10 days`. A
    /// previous session, if any, is overwritten. Broadcasts
    /// [`AuthEvent::LoggedIn`] once the record is stored.
    ///
    /// Returns the record as persisted.
    ///
    /// # Errors
    /// [`SessionError::Store`] if the record couldn't be written; no event
    /// is broadcast in that case.
    pub fn login(&self, mut payload: SessionRecord) -> Result<SessionRecord, SessionError> {
        if payload.expiry.is_none() {
            payload.expiry = Some(ExpiryPolicy::compute_expiry(self.now()));
        }

        self.store.write(&payload)?;

        tracing::info!(
            expiry = ?payload.expiry,
            fields = payload.identity().len(),
            "session created"
        );
        self.broadcaster.notify(AuthEvent::LoggedIn);
        Ok(payload)
    }

    /// Returns the current session, or `None`.
    ///
    /// An expired record is cleared on the spot (and
    /// [`AuthEvent::LoggedOut`] broadcast) before returning `None`. A
    /// corrupt record has already been cleared by the store.
    pub fn get_session(&self) -> Option<SessionRecord> {
        let record = self.store.read()?;

        let now = self.now();
        if ExpiryPolicy::is_expired(&record, now) {
            tracing::info!(%now, expiry = ?record.expiry, "session expired");
            if let Err(e) = self.logout() {
                tracing::warn!(error = %e, "failed to clear expired session");
            }
            return None;
        }

        Some(record)
    }

    /// `true` if there is a valid session right now.
    pub fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }

    /// Slides the expiry to `now + 10 days`.
    ///
    /// Does nothing (and returns `Ok(None)`) without a valid session.
    /// Identity fields are written back unchanged.
    ///
    /// # Errors
    /// [`SessionError::Store`] if the rewrite failed. The old record stays
    /// in place.
    pub fn refresh(&self) -> Result<Option<SessionRecord>, SessionError> {
        let Some(mut record) = self.get_session() else {
            return Ok(None);
        };

        let expiry = ExpiryPolicy::compute_expiry(self.now());
        record.expiry = Some(expiry);
        self.store.write(&record)?;

        tracing::debug!(%expiry, "session refreshed");
        Ok(Some(record))
    }

    /// Merges `patch` into the current session's identity fields.
    ///
    /// The expiry is preserved; an `expiryTime` key in `patch` is ignored.
    /// Without a valid session this does nothing and returns `Ok(None)`.
    ///
    /// # Errors
    /// [`SessionError::Store`] if the rewrite failed.
    pub fn update_fields(&self, patch: Identity) -> Result<Option<SessionRecord>, SessionError> {
        let Some(mut record) = self.get_session() else {
            tracing::debug!("update_fields without a session, ignoring");
            return Ok(None);
        };

        let changed = patch.len();
        record.merge(patch);
        self.store.write(&record)?;

        tracing::debug!(changed, "session fields updated");
        Ok(Some(record))
    }

    /// Clears the session from both tiers and broadcasts
    /// [`AuthEvent::LoggedOut`].
    ///
    /// The event goes out even if clearing a tier failed, since whatever
    /// could be removed is already gone.
    ///
    /// # Errors
    /// [`SessionError::Store`] if a tier couldn't be cleared.
    pub fn logout(&self) -> Result<(), SessionError> {
        let cleared = self.store.clear();
        tracing::info!("session cleared");
        self.broadcaster.notify(AuthEvent::LoggedOut);
        cleared.map_err(SessionError::from)
    }
}

// =========================================================================
// Tests
// =========================================================================
