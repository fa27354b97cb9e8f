//! Appliance software version.

use qumulo_models::VersionInfo;

use crate::credentials::Credentials;
use crate::endpoints::Endpoints;
use crate::error::SdkError;
use crate::request::{Method, RestDispatch, RestResponse};

/// `GET /v1/version`. Works without credentials.
///
/// # Errors
///
/// Any error from the dispatch, or [`SdkError::Serialization`] if the body
/// is not a JSON object.
pub async fn version<D: RestDispatch>(
    conn: &D,
    credentials: Option<&Credentials>,
) -> Result<RestResponse<VersionInfo>, SdkError> {
    conn.rest_request(credentials, Method::GET, Endpoints::VERSION, None)
        .await?
        .decode()
}

/// Version operations bound to a client's dispatch and credentials.
///
/// Obtained from [`RestClient::version`](crate::RestClient::version).
pub struct VersionApi<'a, D> {
    conn: &'a D,
    credentials: Option<&'a Credentials>,
}

impl<'a, D: RestDispatch> VersionApi<'a, D> {
    pub(crate) fn new(conn: &'a D, credentials: Option<&'a Credentials>) -> Self {
        Self { conn, credentials }
    }

    /// See [`version()`].
    ///
    /// # Errors
    ///
    /// Same as [`version()`].
    pub async fn version(&self) -> Result<RestResponse<VersionInfo>, SdkError> {
        version(self.conn, self.credentials).await
    }
}
