//! `BazaarClient` builder and wiring.
//!
//! This is the entry point for an application. It ties the layers
//! together: storage tiers → store → session manager → router and nav bar.

use std::path::PathBuf;
use std::sync::Arc;

use bazaar_guard::{Location, NavBar, Navigation, Router};
use bazaar_session::{
    AuthBroadcaster, Authenticator, Clock, Credentials, SessionManager, SystemClock,
};
use bazaar_store::{FileTier, MemoryTier, SessionStore, StorageTier, StoreError};

use crate::{BazaarError, ClientConfig, LoginFlow};

/// The durable tier a client was built with.
///
/// Kept so a reload can reopen the same durable storage.
#[derive(Debug, Clone)]
enum DurableTier {
    Memory(MemoryTier),
    File(FileTier),
}

impl StorageTier for DurableTier {
    fn name(&self) -> &str {
        match self {
            Self::Memory(tier) => tier.name(),
            Self::File(tier) => tier.name(),
        }
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            Self::Memory(tier) => tier.get(key),
            Self::File(tier) => tier.get(key),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        match self {
            Self::Memory(tier) => tier.set(key, value),
            Self::File(tier) => tier.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(tier) => tier.remove(key),
            Self::File(tier) => tier.remove(key),
        }
    }
}

/// Builder for configuring a [`BazaarClient`].
///
/// # Example
///
/// ```rust
/// use bazaar::prelude::*;
///
/// let client = BazaarClient::builder()
///     .landing_path("/Vendors")
///     .protect("/Bookings")
///     .build()?;
///
/// assert!(!client.manager().is_authenticated());
/// # Ok::<(), BazaarError>(())
/// ```
pub struct BazaarClientBuilder {
    config: ClientConfig,
    clock: Arc<dyn Clock>,
}

impl BazaarClientBuilder {
    /// Creates a builder with default settings and the system clock.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the key the session record is stored under.
    pub fn storage_key(mut self, key: &str) -> Self {
        self.config.storage_key = key.to_string();
        self
    }

    /// Sets the login view.
    pub fn login_path(mut self, path: &str) -> Self {
        self.config.login_path = path.to_string();
        self
    }

    /// Sets where a login with no captured origin lands.
    pub fn landing_path(mut self, path: &str) -> Self {
        self.config.landing_path = path.to_string();
        self
    }

    /// Persists the durable tier as files under `dir`.
    pub fn durable_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.durable_dir = Some(dir.into());
        self
    }

    /// Adds a view to the protected set.
    pub fn protect(mut self, path: &str) -> Self {
        self.config.protected_paths.push(path.to_string());
        self
    }

    /// Uses `clock` instead of the system clock.
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    /// [`BazaarError::Guard`] if a configured path isn't absolute.
    pub fn build(self) -> Result<BazaarClient, BazaarError> {
        let config = self.config;
        Location::parse(&config.login_path)?;
        Location::parse(&config.landing_path)?;
        for path in &config.protected_paths {
            Location::parse(path)?;
        }

        let durable = match &config.durable_dir {
            Some(dir) => DurableTier::File(FileTier::new("durable", dir.clone())),
            None => DurableTier::Memory(MemoryTier::new("durable")),
        };

        tracing::info!(
            key = %config.storage_key,
            durable = ?config.durable_dir,
            protected = config.protected_paths.len(),
            "client configured"
        );
        Ok(BazaarClient::open(config, durable, self.clock))
    }
}

impl Default for BazaarClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One browsing context: its own ephemeral tier, router and nav bar, over
/// durable storage that outlives it.
pub struct BazaarClient {
    config: ClientConfig,
    durable: DurableTier,
    clock: Arc<dyn Clock>,
    manager: Arc<SessionManager>,
    router: Router,
    nav: NavBar,
}

impl BazaarClient {
    /// Creates a new builder.
    pub fn builder() -> BazaarClientBuilder {
        BazaarClientBuilder::new()
    }

    fn open(config: ClientConfig, durable: DurableTier, clock: Arc<dyn Clock>) -> Self {
        let store = SessionStore::new(
            MemoryTier::new("ephemeral"),
            durable.clone(),
            config.store_config(),
        );
        let manager = Arc::new(SessionManager::with_clock(
            store,
            AuthBroadcaster::new(),
            Arc::clone(&clock),
        ));
        let router = Router::new(Arc::clone(&manager), config.router_config())
            .protect(config.protected_paths.iter().cloned());
        let nav = NavBar::new(Arc::clone(&manager));

        Self {
            config,
            durable,
            clock,
            manager,
            router,
            nav,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    pub fn broadcaster(&self) -> &AuthBroadcaster {
        self.manager.broadcaster()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    /// Navigates to `target`. See [`Router::navigate`].
    ///
    /// # Errors
    /// [`BazaarError::Guard`] if `target` isn't an absolute path.
    pub fn navigate(&mut self, target: &str) -> Result<Navigation, BazaarError> {
        Ok(self.router.navigate(target)?)
    }

    /// Signs in through `flow` and forwards to the captured origin.
    /// See [`LoginFlow::submit`].
    pub async fn submit_login<A: Authenticator>(
        &mut self,
        flow: &LoginFlow<A>,
        credentials: &Credentials,
    ) -> Result<Navigation, BazaarError> {
        flow.submit(&mut self.router, credentials).await
    }

    /// Logs out and shows the login view.
    ///
    /// # Errors
    /// [`BazaarError::Guard`] if a tier couldn't be cleared.
    pub fn logout(&mut self) -> Result<Navigation, BazaarError> {
        Ok(self.router.logout()?)
    }

    /// Opens a fresh browsing context over the same durable storage,
    /// as if the page were reloaded: the ephemeral tier starts empty and
    /// a session is promoted back from the durable tier on first read.
    pub fn reload(&self) -> BazaarClient {
        tracing::debug!("reloading browsing context");
        BazaarClient::open(self.config.clone(), self.durable.clone(), Arc::clone(&self.clock))
    }
}

#[cfg(test)]
mod tests {
    use bazaar_guard::RouteAccess;
    use bazaar_record::{EpochMillis, SessionRecord};
    use bazaar_session::ManualClock;
    use serde_json::json;

    use super::*;

    fn client() -> BazaarClient {
        BazaarClient::builder()
            .clock(ManualClock::new(EpochMillis(1_718_000_000_000)))
            .build()
            .unwrap()
    }

    fn decorator() -> SessionRecord {
        SessionRecord::from_value(json!({ "vendor_id": 55, "vendor_name": "Rangoli Decor" }))
            .unwrap()
    }

    #[test]
    fn test_build_with_defaults_protects_default_paths() {
        let client = client();
        assert_eq!(client.router().access("/VendorProfile"), RouteAccess::Protected);
        assert_eq!(client.router().access("/"), RouteAccess::Public);
    }

    #[test]
    fn test_build_rejects_relative_login_path() {
        let result = BazaarClient::builder().login_path("VendorLogin").build();
        assert!(matches!(result, Err(BazaarError::Guard(_))));
    }

    #[test]
    fn test_protect_adds_path() {
        let client = BazaarClient::builder().protect("/Bookings").build().unwrap();
        assert_eq!(client.router().access("/Bookings"), RouteAccess::Protected);
    }

    #[test]
    fn test_reload_promotes_session_from_durable_tier() {
        let client = client();
        client.manager().login(decorator()).unwrap();

        let reloaded = client.reload();

        assert!(reloaded.manager().store().ephemeral().get("userData").unwrap().is_none());
        assert!(reloaded.manager().is_authenticated());
        assert!(reloaded.manager().store().ephemeral().get("userData").unwrap().is_some());
    }

    #[test]
    fn test_storage_key_is_used_by_both_tiers() {
        let client = BazaarClient::builder().storage_key("vendorSession").build().unwrap();
        client.manager().login(decorator()).unwrap();

        let store = client.manager().store();
        assert_eq!(store.key(), "vendorSession");
        assert!(store.durable().get("vendorSession").unwrap().is_some());
        assert!(store.durable().get("userData").unwrap().is_none());
    }

    #[test]
    fn test_logout_returns_to_login_view() {
        let mut client = client();
        client.manager().login(decorator()).unwrap();

        let nav = client.logout().unwrap();

        assert_eq!(nav.location(), &Location::new("/VendorLogin"));
        assert!(!client.nav().render().shows_account());
    }
}
