//! Where and how to reach an appliance.

use std::fmt;
use std::time::Duration;

/// Default port of the appliance REST API.
pub const DEFAULT_PORT: u16 = 8000;

/// URL scheme used to reach the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Plain HTTP. Only useful against test servers.
    Http,
    /// HTTP over TLS.
    #[default]
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Http => "http",
            Self::Https => "https",
        })
    }
}

/// Host, port, timeout and TLS settings for one client session.
///
/// Owned by the caller and handed to
/// [`HttpConnection::new`](crate::request::HttpConnection::new) once.
///
/// Appliances ship with self-signed certificates, so certificate
/// verification is off unless [`Self::verify_certificates`] turns it on.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use qumulo_sdk::{ConnectionInfo, Scheme};
///
/// let info = ConnectionInfo::new("qumulo.example.com", 8000)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(info.base_url(), "https://qumulo.example.com:8000");
///
/// let local = ConnectionInfo::new("::1", 8000).with_scheme(Scheme::Http);
/// assert_eq!(local.base_url(), "http://[::1]:8000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Appliance host name or IP address.
    pub host: String,
    /// REST API port.
    pub port: u16,
    /// URL scheme.
    pub scheme: Scheme,
    /// Applied to connect (including the TLS handshake) and to each read.
    /// `None` waits forever.
    pub timeout: Option<Duration>,
    /// Accept certificates that do not chain to a trusted root.
    pub accept_invalid_certs: bool,
}

impl ConnectionInfo {
    /// HTTPS connection without timeout, accepting self-signed certificates.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            scheme: Scheme::Https,
            timeout: None,
            accept_invalid_certs: true,
        }
    }

    /// Set the connect/read timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Require (`true`) or skip (`false`) TLS certificate verification.
    #[must_use]
    pub fn verify_certificates(mut self, verify: bool) -> Self {
        self.accept_invalid_certs = !verify;
        self
    }

    /// `scheme://host:port`, with IPv6 literals bracketed.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("{}://[{}]:{}", self.scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}
