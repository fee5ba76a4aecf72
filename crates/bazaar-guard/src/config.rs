//! Router configuration, route access levels and per-navigation auth state.

use serde::{Deserialize, Serialize};

/// Default path of the login view.
pub const DEFAULT_LOGIN_PATH: &str = "/VendorLogin";

/// Default landing view after a login with no captured origin.
pub const DEFAULT_LANDING_PATH: &str = "/VendorList";

// ---------------------------------------------------------------------------
// RouterConfig
// ---------------------------------------------------------------------------

/// Where the router sends visitors around login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// The login view. Unauthenticated visitors to a protected view are
    /// redirected here.
    pub login_path: String,

    /// Where a completed login lands when nothing was captured.
    pub landing_path: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RouteAccess
// ---------------------------------------------------------------------------

/// Who may see a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Anyone. Unregistered paths are public.
    #[default]
    Public,
    /// Only visitors with a valid session; others go to the login view.
    Protected,
}

// ---------------------------------------------------------------------------
// AuthState
// ---------------------------------------------------------------------------

/// What the guard knows about the visitor.
///
/// Each guarded navigation starts from `Unknown` and settles into one of
/// the other two. Nothing re-checks in the background.
///
/// ```text
///            ┌──→ Authenticated     (render, expiry slid forward)
/// Unknown ───┤
///            └──→ Unauthenticated   (redirect to login)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    /// Settles an `Unknown` state from a session check.
    pub fn resolve(authenticated: bool) -> Self {
        if authenticated {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }

    /// `true` once the state has been decided.
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Unauthenticated => write!(f, "Unauthenticated"),
        }
    }
}
