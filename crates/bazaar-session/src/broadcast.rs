//! Auth-state broadcast: login/logout notifications for decoupled UI regions.
//!
//! The nav bar and the logout button don't sit above or below the login
//! screen, so they can't be handed the new state directly. Instead they
//! subscribe here and the session manager calls [`AuthBroadcaster::notify`]
//! on every login and logout.
//!
//! # Delivery rules
//!
//! - Synchronous: `notify` returns after every listener has run.
//! - At most once per listener per `notify` call.
//! - No replay: a listener subscribed after an event never sees it. A
//!   late subscriber asks the session manager for the current state.
//!
//! An event is a hint to re-render, not a source of truth.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;

/// A login state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthEvent {
    /// A session was just created.
    LoggedIn,
    /// The session was cleared (explicit logout or discovered expiry).
    LoggedOut,
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedIn => write!(f, "logged-in"),
            Self::LoggedOut => write!(f, "logged-out"),
        }
    }
}

type Listener = Arc<dyn Fn(AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Publish/subscribe hub for [`AuthEvent`]s.
///
/// Cheap to clone; clones share one listener registry.
#[derive(Clone, Default)]
pub struct AuthBroadcaster {
    registry: Arc<Mutex<Registry>>,
}

impl AuthBroadcaster {
    /// Creates a broadcaster with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`. It stays registered until the returned
    /// [`Subscription`] is dropped or [`unsubscribe`](Subscription::unsubscribe)d.
    pub fn subscribe(
        &self,
        listener: impl Fn(AuthEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        tracing::trace!(subscription = id, "auth listener subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Subscribes an async consumer: every event is forwarded into an
    /// unbounded channel.
    ///
    /// Once the receiver is dropped, further events are discarded; the
    /// subscription is removed only when the `Subscription` is dropped.
    pub fn subscribe_channel(&self) -> (Subscription, mpsc::UnboundedReceiver<AuthEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(move |event| {
            let _ = tx.send(event);
        });
        (subscription, rx)
    }

    /// Delivers `event` to every current listener, in subscription order.
    ///
    /// The registry lock is released before listeners run, so a listener
    /// may subscribe, unsubscribe, or trigger another `notify`.
    ///
    /// Returns how many listeners were called.
    pub fn notify(&self, event: AuthEvent) -> usize {
        let listeners: Vec<Listener> = self
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &listeners {
            listener(event);
        }

        tracing::debug!(%event, delivered = listeners.len(), "auth event broadcast");
        listeners.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for AuthBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthBroadcaster")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
///
/// Holds only a weak reference to the registry, so an outstanding
/// subscription never keeps a broadcaster alive.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Removes the listener now. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.retain(|(id, _)| *id != self.id);
            tracing::trace!(subscription = self.id, "auth listener unsubscribed");
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// A listener that records every event it receives.
    fn recorder(broadcaster: &AuthBroadcaster) -> (Subscription, Arc<Mutex<Vec<AuthEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = broadcaster.subscribe(move |event| sink.lock().unwrap().push(event));
        (sub, seen)
    }

    #[test]
    fn test_notify_delivers_to_every_listener_once() {
        let broadcaster = AuthBroadcaster::new();
        let (_a, seen_a) = recorder(&broadcaster);
        let (_b, seen_b) = recorder(&broadcaster);

        let delivered = broadcaster.notify(AuthEvent::LoggedIn);

        assert_eq!(delivered, 2);
        assert_eq!(*seen_a.lock().unwrap(), vec![AuthEvent::LoggedIn]);
        assert_eq!(*seen_b.lock().unwrap(), vec![AuthEvent::LoggedIn]);
    }

    #[test]
    fn test_notify_without_listeners_returns_zero() {
        assert_eq!(AuthBroadcaster::new().notify(AuthEvent::LoggedOut), 0);
    }

    #[test]
    fn test_late_subscriber_gets_no_replay() {
        let broadcaster = AuthBroadcaster::new();
        broadcaster.notify(AuthEvent::LoggedIn);

        let (_sub, seen) = recorder(&broadcaster);

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let broadcaster = AuthBroadcaster::new();
        let (sub, seen) = recorder(&broadcaster);

        sub.unsubscribe();
        broadcaster.notify(AuthEvent::LoggedOut);

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_subscription_unsubscribes_only_that_listener() {
        let broadcaster = AuthBroadcaster::new();
        let (first, _) = recorder(&broadcaster);
        let (_second, seen_second) = recorder(&broadcaster);

        drop(first);
        broadcaster.notify(AuthEvent::LoggedIn);

        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(*seen_second.lock().unwrap(), vec![AuthEvent::LoggedIn]);
    }

    #[test]
    fn test_subscription_outliving_broadcaster_drops_cleanly() {
        let broadcaster = AuthBroadcaster::new();
        let (sub, _) = recorder(&broadcaster);
        drop(broadcaster);
        drop(sub);
    }

    #[test]
    fn test_listener_may_notify_reentrantly() {
        // The lock is not held while listeners run, so this must not deadlock.
        let broadcaster = AuthBroadcaster::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = broadcaster.clone();
        let counter = Arc::clone(&calls);
        let _sub = broadcaster.subscribe(move |event| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 && event == AuthEvent::LoggedIn {
                inner.notify(AuthEvent::LoggedOut);
            }
        });

        broadcaster.notify(AuthEvent::LoggedIn);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_subscribe_channel_forwards_events() {
        let broadcaster = AuthBroadcaster::new();
        let (_sub, mut rx) = broadcaster.subscribe_channel();

        broadcaster.notify(AuthEvent::LoggedIn);
        broadcaster.notify(AuthEvent::LoggedOut);

        assert_eq!(rx.recv().await, Some(AuthEvent::LoggedIn));
        assert_eq!(rx.recv().await, Some(AuthEvent::LoggedOut));
    }

    #[test]
    fn test_auth_event_display() {
        assert_eq!(AuthEvent::LoggedIn.to_string(), "logged-in");
        assert_eq!(AuthEvent::LoggedOut.to_string(), "logged-out");
    }
}
