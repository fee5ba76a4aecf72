//! Client configuration.

use std::path::PathBuf;

use bazaar_guard::{DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH, RouterConfig};
use bazaar_store::{DEFAULT_STORAGE_KEY, StoreConfig};
use serde::{Deserialize, Serialize};

/// Views that need a signed-in visitor unless configured otherwise.
pub const DEFAULT_PROTECTED_PATHS: [&str; 5] = [
    "/VendorProfile",
    "/EditServices",
    "/Services",
    "/ServiceDetails",
    "/payment",
];

/// Everything needed to wire a [`BazaarClient`](crate::BazaarClient).
///
/// Missing fields take their defaults when deserialized, so a config file
/// only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Key the session record is stored under in both tiers.
    pub storage_key: String,

    /// The login view.
    pub login_path: String,

    /// Where a login with no captured origin lands.
    pub landing_path: String,

    /// Directory for the durable tier. `None` keeps it in memory, which
    /// lasts only as long as the process.
    pub durable_dir: Option<PathBuf>,

    /// Views behind the route guard.
    pub protected_paths: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
            durable_dir: None,
            protected_paths: DEFAULT_PROTECTED_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            key: self.storage_key.clone(),
        }
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            login_path: self.login_path.clone(),
            landing_path: self.landing_path.clone(),
        }
    }
}
