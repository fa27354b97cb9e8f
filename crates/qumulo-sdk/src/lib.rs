//! # Qumulo SDK
//!
//! Client SDK for the **Qumulo** appliance REST API.
//!
//! The SDK provides:
//!
//! * [`RestClient`] — a session against one appliance, exposing one typed
//!   sub-client per API area ([`auth`](RestClient::auth),
//!   [`version`](RestClient::version)).
//! * [`auth`] — login, password change and identity lookup as free
//!   functions over any [`RestDispatch`].
//! * [`HttpConnection`] — the `reqwest`-backed dispatch, configured from a
//!   [`ConnectionInfo`].
//! * [`Credentials`] — key material returned by login.
//! * [`Endpoints`] — canonical REST paths.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! Wire types from [`qumulo_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use qumulo_sdk::{ConnectionInfo, RestClient};
//!
//! # async fn run() -> Result<(), qumulo_sdk::SdkError> {
//! let mut client = RestClient::connect(ConnectionInfo::new("qumulo.example.com", 8000))?;
//! client.login("admin", "admin").await?;
//! client.auth().change_password("admin", "n3w-passw0rd").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod connection;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod version;

pub use auth::AuthApi;
pub use client::RestClient;
pub use connection::{ConnectionInfo, Scheme, DEFAULT_PORT};
pub use credentials::Credentials;
pub use endpoints::Endpoints;
pub use error::SdkError;
pub use request::{HttpConnection, Method, RestDispatch, RestResponse};
pub use version::VersionApi;

// Re-export wire types from qumulo-models for ergonomic usage.
pub use qumulo_models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ModelError, UserIdentity, VersionInfo,
};
