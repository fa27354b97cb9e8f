//! Fake appliance configuration.
//!
//! Built either programmatically (tests) or from environment variables
//! (the `mock-qumulo` binary).

use std::time::Duration;

/// A local account known to the fake appliance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Login name.
    pub name: String,
    /// Current password.
    pub password: String,
}

impl UserAccount {
    /// Build an account.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// Behaviour of the fake appliance.
#[derive(Debug, Clone)]
pub struct ApplianceConfig {
    /// Accounts, assigned ids `500`, `501`, ... in order.
    pub users: Vec<UserAccount>,
    /// Sleep this long before answering any request.
    pub response_delay: Option<Duration>,
    /// Offset added to the appliance clock when it stamps `issue` on a
    /// login response. Non-zero values emulate a server whose clock
    /// disagrees with the client's.
    pub clock_skew_secs: i64,
    /// Reported by `GET /v1/version`.
    pub revision_id: String,
    /// Port the binary listens on (default `8000`).
    pub listen_port: u16,
}

impl Default for ApplianceConfig {
    fn default() -> Self {
        Self {
            users: vec![UserAccount::new("admin", "admin")],
            response_delay: None,
            clock_skew_secs: 365 * 24 * 3600,
            revision_id: "Qumulo Core (mock)".to_string(),
            listen_port: 8000,
        }
    }
}

impl ApplianceConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                 | Default | Description                        |
    /// |--------------------------|---------|------------------------------------|
    /// | `MOCK_QUMULO_PORT`       | `8000`  | HTTP listen port                   |
    /// | `MOCK_QUMULO_USERNAME`   | `admin` | Name of the single local account   |
    /// | `MOCK_QUMULO_PASSWORD`   | `admin` | Its password                       |
    /// | `MOCK_QUMULO_DELAY_MS`   | unset   | Delay before every response        |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let listen_port = std::env::var("MOCK_QUMULO_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.listen_port);

        let username =
            std::env::var("MOCK_QUMULO_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password =
            std::env::var("MOCK_QUMULO_PASSWORD").unwrap_or_else(|_| "admin".to_string());

        let response_delay = std::env::var("MOCK_QUMULO_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis);

        Self {
            users: vec![UserAccount::new(username, password)],
            response_delay,
            listen_port,
            ..defaults
        }
    }

    /// Replace the account list.
    #[must_use]
    pub fn with_users(mut self, users: Vec<UserAccount>) -> Self {
        self.users = users;
        self
    }

    /// Delay every response.
    #[must_use]
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = Some(delay);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_admin() {
        let cfg = ApplianceConfig::default();
        assert_eq!(cfg.users, vec![UserAccount::new("admin", "admin")]);
        assert!(cfg.response_delay.is_none());
        assert_ne!(cfg.clock_skew_secs, 0);
    }

    #[test]
    fn default_listen_port() {
        let cfg = ApplianceConfig::from_env();
        assert_eq!(cfg.listen_port, 8000);
    }

    #[test]
    fn builders() {
        let cfg = ApplianceConfig::default()
            .with_users(vec![UserAccount::new("bob", "pw")])
            .with_response_delay(Duration::from_secs(2));
        assert_eq!(cfg.users[0].name, "bob");
        assert_eq!(cfg.response_delay, Some(Duration::from_secs(2)));
    }
}
