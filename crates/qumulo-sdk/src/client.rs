//! High-level REST client for a Qumulo appliance.
//!
//! [`RestClient`] holds one connection and the current session's
//! credentials, and hands out one typed sub-client per API area.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use qumulo_sdk::{ConnectionInfo, RestClient};
//!
//! # async fn run() -> Result<(), qumulo_sdk::SdkError> {
//! let info = ConnectionInfo::new("qumulo.example.com", 8000)
//!     .with_timeout(Duration::from_secs(10));
//! let mut client = RestClient::connect(info)?;
//!
//! client.login("admin", "admin").await?;
//! let me = client.auth().who_am_i().await?.into_data();
//! println!("logged in as {:?}", me.name);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::auth::AuthApi;
use crate::connection::ConnectionInfo;
use crate::credentials::Credentials;
use crate::error::SdkError;
use crate::request::{HttpConnection, Method, RestDispatch};
use crate::version::VersionApi;

/// A client session against one appliance.
///
/// Sub-clients returned by [`auth`](Self::auth) and
/// [`version`](Self::version) borrow the client and use whatever
/// credentials it holds at that moment.
pub struct RestClient<D = HttpConnection> {
    conn: D,
    credentials: Option<Credentials>,
}

impl RestClient<HttpConnection> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build an HTTP client for `info`. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] if the HTTP client cannot be built.
    pub fn connect(info: ConnectionInfo) -> Result<Self, SdkError> {
        Ok(Self::with_dispatch(HttpConnection::new(&info)?))
    }

    /// The connection settings.
    pub fn conninfo(&self) -> &ConnectionInfo {
        self.conn.info()
    }
}

impl<D: RestDispatch> RestClient<D> {
    /// Wrap an existing dispatch, without credentials.
    pub fn with_dispatch(conn: D) -> Self {
        Self {
            conn,
            credentials: None,
        }
    }

    /// Start from previously saved credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    // ------------------------------------------------------------------
    // API areas
    // ------------------------------------------------------------------

    /// Session operations.
    pub fn auth(&self) -> AuthApi<'_, D> {
        AuthApi::new(&self.conn, self.credentials.as_ref())
    }

    /// Appliance version.
    pub fn version(&self) -> VersionApi<'_, D> {
        VersionApi::new(&self.conn, self.credentials.as_ref())
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Log in and install the returned credentials on this client.
    ///
    /// Any previous credentials are replaced only if the login succeeds.
    ///
    /// # Errors
    ///
    /// See [`auth::login`](crate::auth::login).
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&Credentials, SdkError> {
        let resp = self.auth().login(username, password).await?;
        Ok(&*self.credentials.insert(Credentials::from_login(&resp.data)))
    }

    /// Current credentials, if logged in.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Replace the current credentials.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Forget the current credentials and return them.
    pub fn clear_credentials(&mut self) -> Option<Credentials> {
        self.credentials.take()
    }

    // ------------------------------------------------------------------
    // Raw access
    // ------------------------------------------------------------------

    /// Send an arbitrary request with the current credentials.
    ///
    /// Returns the body only; the etag is dropped.
    ///
    /// # Errors
    ///
    /// Any error from the dispatch.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<Value, SdkError> {
        let resp = self
            .conn
            .rest_request(self.credentials.as_ref(), method, uri, body)
            .await?;
        Ok(resp.into_data())
    }

    /// The underlying dispatch.
    pub fn dispatch(&self) -> &D {
        &self.conn
    }
}
