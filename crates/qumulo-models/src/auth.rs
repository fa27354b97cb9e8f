//! Request and response bodies for the session endpoints.
//!
//! ```text
//! POST /v1/login        LoginRequest          → LoginResponse
//! POST /v1/setpassword  ChangePasswordRequest → (empty)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ascii::parse_ascii;
use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Body of `POST /v1/login`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Build a login body, validating both fields as printable ASCII.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotPrintableAscii`] for the first invalid field.
    pub fn new(username: &str, password: &str) -> Result<Self, ModelError> {
        Ok(Self {
            username: parse_ascii(username, "username")?.to_string(),
            password: parse_ascii(password, "password")?.to_string(),
        })
    }
}

/// Key material returned by `POST /v1/login`.
///
/// `issue` is stamped by the client with its own Unix time when the
/// response arrives. Expiry is computed as a local delta from that value,
/// so whatever the server sends in this field is discarded. Any other
/// fields the appliance returns (e.g. `bearer_token`) are kept in `extra`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Identifier of the issued key.
    pub key_id: String,
    /// Secret key material.
    pub key: String,
    /// Algorithm the key is meant for.
    pub algorithm: String,
    /// Local Unix time (seconds) at which the response was received.
    #[serde(default)]
    pub issue: i64,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("key_id", &self.key_id)
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("issue", &self.issue)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

/// Body of `POST /v1/setpassword`.
///
/// Acts on the identity of the authenticated session; there is no user id
/// field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    /// Current password of the logged-in user.
    pub old_password: String,
    /// Password to set.
    pub new_password: String,
}

impl ChangePasswordRequest {
    /// Build a password-change body, validating both fields as printable ASCII.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotPrintableAscii`] for the first invalid field.
    pub fn new(old_password: &str, new_password: &str) -> Result<Self, ModelError> {
        Ok(Self {
            old_password: parse_ascii(old_password, "old password")?.to_string(),
            new_password: parse_ascii(new_password, "new password")?.to_string(),
        })
    }
}
