//! # Bazaar
//!
//! Client-side session lifecycle for marketplace web clients.
//!
//! Bazaar keeps one signed-in identity per browsing context in two storage
//! tiers, expires it after ten idle days, guards protected views, and tells
//! the navigation chrome when someone logs in or out. Applications
//! implement the [`Authenticator`](bazaar_session::Authenticator) trait
//! for their backend's login call; the client handles the rest.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bazaar::prelude::*;
//!
//! // Implement Authenticator for your backend, then:
//! // let mut client = BazaarClient::builder()
//! //     .durable_dir("/var/lib/marketplace")
//! //     .build()?;
//! // client.navigate("/VendorProfile")?;          // bounced to /VendorLogin
//! // let flow = LoginFlow::new(MyBackend::new());
//! // client.submit_login(&flow, &Credentials::vendor(email, password)).await?;
//! ```

mod client;
mod config;
mod error;
mod login;

pub use client::{BazaarClient, BazaarClientBuilder};
pub use config::{ClientConfig, DEFAULT_PROTECTED_PATHS};
pub use error::BazaarError;
pub use login::LoginFlow;

/// Convenient re-exports for applications.
///
/// ```rust
/// use bazaar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{BazaarClient, BazaarClientBuilder, BazaarError, ClientConfig, LoginFlow};

    pub use bazaar_guard::{
        AuthButton, AuthState, GuardOutcome, Location, NavBar, NavView, Navigation,
        RouteAccess, RouteGuard, Router, RouterConfig,
    };
    pub use bazaar_record::{EpochMillis, Identity, SessionRecord};
    pub use bazaar_session::{
        AccountRole, AuthBroadcaster, AuthEvent, Authenticator, Clock, Credentials,
        ExpiryPolicy, FIXED_WINDOW, LoginResponse, ManualClock, SessionError,
        SessionManager, Subscription, SystemClock,
    };
    pub use bazaar_store::{FileTier, MemoryTier, SessionStore, StorageTier, StoreConfig};
}
