//! Authentication credentials returned by `POST /v1/login`.

use std::fmt;

use qumulo_models::LoginResponse;
use serde::{Deserialize, Serialize};

/// Credentials obtained after a successful login.
///
/// Attached to every subsequent authenticated request. A value never
/// changes after construction; a new login produces a new value that
/// replaces the old one wholesale.
///
/// * `key_id`    – identifier of the issued key.
/// * `key`       – secret key material, sent as a bearer token.
/// * `algorithm` – algorithm the key is meant for.
/// * `issue`     – local Unix time (seconds) at which the key was received.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    key_id: String,
    key: String,
    algorithm: String,
    issue: i64,
}

impl Credentials {
    /// Build credentials from their parts.
    pub fn new(
        key_id: impl Into<String>,
        key: impl Into<String>,
        algorithm: impl Into<String>,
        issue: i64,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key: key.into(),
            algorithm: algorithm.into(),
            issue,
        }
    }

    /// Copy the key material out of a login response.
    pub fn from_login(resp: &LoginResponse) -> Self {
        Self::new(&resp.key_id, &resp.key, &resp.algorithm, resp.issue)
    }

    /// Identifier of the issued key.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Secret key material.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Algorithm the key is meant for.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Local Unix time at which the key was received.
    pub fn issue(&self) -> i64 {
        self.issue
    }

    /// Seconds elapsed between `issue` and `now`, both local Unix times.
    ///
    /// Expiry is only ever computed this way: the appliance and the client
    /// agree on how fast time passes, not on what time it is.
    pub fn age(&self, now: i64) -> i64 {
        now - self.issue
    }

    /// Value of the `Authorization` header for authenticated requests.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.key)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("issue", &self.issue)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_response() -> LoginResponse {
        LoginResponse {
            key_id: "key_id".into(),
            key: "key".into(),
            algorithm: "algorithm".into(),
            issue: 1_400_000_000,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn from_login_copies_key_material() {
        let creds = Credentials::from_login(&login_response());
        assert_eq!(creds.key_id(), "key_id");
        assert_eq!(creds.key(), "key");
        assert_eq!(creds.algorithm(), "algorithm");
        assert_eq!(creds.issue(), 1_400_000_000);
    }

    #[test]
    fn age_is_local_delta() {
        let creds = Credentials::from_login(&login_response());
        assert_eq!(creds.age(1_400_000_090), 90);
    }

    #[test]
    fn debug_redacts_key() {
        let creds = Credentials::new("kid", "hunter2", "alg", 0);
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("kid"));
    }

    #[test]
    fn authorization_header_is_bearer() {
        let creds = Credentials::new("kid", "abc", "alg", 0);
        assert_eq!(creds.authorization_header(), "Bearer abc");
    }
}
