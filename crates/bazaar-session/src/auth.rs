//! Authentication hook: the remote login call, seen from the session layer.
//!
//! Bazaar doesn't talk to the marketplace backend itself. It defines the
//! [`Authenticator`] trait: one async method that takes credentials and
//! returns the raw session payload or the backend's failure message. The
//! login flow awaits it and hands a success to
//! [`SessionManager::login`](crate::SessionManager::login).
//!
//! [`LoginResponse`] decodes the backend's reply envelope so an
//! implementation built on any HTTP client only has to fetch the JSON.

use std::fmt;

use bazaar_record::SessionRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SessionError;

/// Message used when the backend rejects a login without saying why.
pub const GENERIC_LOGIN_FAILURE: &str = "Login failed. Please try again.";

/// Which login screen the credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// A customer browsing the catalog.
    User,
    /// A vendor managing their listings.
    Vendor,
}

impl AccountRole {
    /// Prefix of the backend's form field names (`vendor_email`, `user_password`).
    pub fn field_prefix(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_prefix())
    }
}

/// What the login form collects.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub role: AccountRole,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Vendor login credentials.
    pub fn vendor(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role: AccountRole::Vendor,
            email: email.into(),
            password: password.into(),
        }
    }

    /// Customer login credentials.
    pub fn user(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role: AccountRole::User,
            email: email.into(),
            password: password.into(),
        }
    }

    /// The multipart form fields the backend's login endpoints expect.
    pub fn form_fields(&self) -> [(String, String); 2] {
        let prefix = self.role.field_prefix();
        [
            (format!("{prefix}_email"), self.email.clone()),
            (format!("{prefix}_password"), self.password.clone()),
        ]
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Exchanges credentials for a raw session payload.
///
/// # Example
///
/// ```rust
/// use bazaar_record::SessionRecord;
/// use bazaar_session::{Authenticator, Credentials, SessionError};
///
/// /// Accepts one hard-coded vendor. Only for demos and tests.
/// struct FixedVendor;
///
/// impl Authenticator for FixedVendor {
///     async fn authenticate(
///         &self,
///         credentials: &Credentials,
///     ) -> Result<SessionRecord, SessionError> {
///         if credentials.password != "open-sesame" {
///             return Err(SessionError::AuthFailed("Invalid credentials".into()));
///         }
///         let mut record = SessionRecord::default();
///         record.set_field("vendor_email", credentials.email.as_str());
///         Ok(record)
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Performs the login call.
    ///
    /// # Returns
    /// - `Ok(record)` — the backend's identity payload, usually without an
    ///   expiry (the session manager adds one)
    /// - `Err(SessionError::AuthFailed(msg))` — rejected; `msg` is shown
    ///   to the visitor as-is
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<SessionRecord, SessionError>> + Send;
}

/// The backend's reply to a login request.
///
/// ```text
/// { "status": 1, "message": "Login successful", "data": { "vendor_id": 41, ... } }
/// { "status": 0, "message": "Invalid credentials" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// `1` means success; anything else is a rejection.
    pub status: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl LoginResponse {
    /// The status value that signals a successful login.
    pub const SUCCESS: i64 = 1;

    /// Converts the reply into a session payload.
    ///
    /// # Errors
    /// - [`SessionError::AuthFailed`] with the backend's message when
    ///   `status != 1` (or [`GENERIC_LOGIN_FAILURE`] if it sent none)
    /// - [`SessionError::InvalidPayload`] when `status == 1` but `data` is
    ///   missing or not an object
    pub fn into_payload(self) -> Result<SessionRecord, SessionError> {
        if self.status != Self::SUCCESS {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());
            return Err(SessionError::AuthFailed(message));
        }

        let data = self.data.unwrap_or(Value::Null);
        Ok(SessionRecord::from_value(data)?)
    }
}
