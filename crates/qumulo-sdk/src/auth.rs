//! Session operations: login, password change, identity lookup.
//!
//! Each function validates its inputs, builds one request and hands it to
//! a [`RestDispatch`]. Inputs are checked before anything is sent, so a
//! validation failure never reaches the network. Dispatch failures are
//! returned unchanged.

use chrono::Utc;
use qumulo_models::{ChangePasswordRequest, LoginRequest, LoginResponse, UserIdentity};
use serde_json::Value;
use tracing::info;

use crate::credentials::Credentials;
use crate::endpoints::Endpoints;
use crate::error::SdkError;
use crate::request::{Method, RestDispatch, RestResponse};

/// `POST /v1/login`.
///
/// On success `issue` is overwritten with the local Unix time, whatever the
/// appliance sent. Turning the response into [`Credentials`] and attaching
/// them to later calls is up to the caller.
///
/// # Errors
///
/// [`SdkError::Validation`] if either argument is not printable ASCII, or
/// any error from the dispatch.
pub async fn login<D: RestDispatch>(
    conn: &D,
    credentials: Option<&Credentials>,
    username: &str,
    password: &str,
) -> Result<RestResponse<LoginResponse>, SdkError> {
    let body = serde_json::to_value(LoginRequest::new(username, password)?)?;

    let mut resp = conn
        .rest_request(credentials, Method::POST, Endpoints::LOGIN, Some(body))
        .await?;

    // `issue` is replaced before decoding; the appliance may send any JSON type there.
    if let Value::Object(fields) = &mut resp.data {
        fields.insert("issue".into(), Utc::now().timestamp().into());
    }
    let resp = resp.decode::<LoginResponse>()?;

    info!(username, key_id = %resp.data.key_id, "login succeeded");
    Ok(resp)
}

/// `POST /v1/setpassword`.
///
/// Acts on the user the `credentials` belong to. Changing another user's
/// password is a different, administrative endpoint. The response is
/// passed through untouched.
///
/// # Errors
///
/// [`SdkError::Validation`] if either password is not printable ASCII, or
/// any error from the dispatch.
pub async fn change_password<D: RestDispatch>(
    conn: &D,
    credentials: Option<&Credentials>,
    old_password: &str,
    new_password: &str,
) -> Result<RestResponse<Value>, SdkError> {
    let body = serde_json::to_value(ChangePasswordRequest::new(old_password, new_password)?)?;

    let resp = conn
        .rest_request(credentials, Method::POST, Endpoints::SET_PASSWORD, Some(body))
        .await?;

    info!(key_id = credentials.map(Credentials::key_id), "password changed");
    Ok(resp)
}

/// `GET /v1/who-am-i`: the user the `credentials` belong to.
///
/// # Errors
///
/// Any error from the dispatch, or [`SdkError::Serialization`] if the body
/// is not a user resource.
pub async fn who_am_i<D: RestDispatch>(
    conn: &D,
    credentials: Option<&Credentials>,
) -> Result<RestResponse<UserIdentity>, SdkError> {
    conn.rest_request(credentials, Method::GET, Endpoints::WHO_AM_I, None)
        .await?
        .decode()
}

// ---------------------------------------------------------------------------
// Sub-client
// ---------------------------------------------------------------------------

/// Session operations bound to a client's dispatch and credentials.
///
/// Obtained from [`RestClient::auth`](crate::RestClient::auth).
pub struct AuthApi<'a, D> {
    conn: &'a D,
    credentials: Option<&'a Credentials>,
}

impl<'a, D: RestDispatch> AuthApi<'a, D> {
    pub(crate) fn new(conn: &'a D, credentials: Option<&'a Credentials>) -> Self {
        Self { conn, credentials }
    }

    /// See [`login`].
    ///
    /// # Errors
    ///
    /// Same as [`login`].
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RestResponse<LoginResponse>, SdkError> {
        login(self.conn, self.credentials, username, password).await
    }

    /// See [`change_password`].
    ///
    /// # Errors
    ///
    /// Same as [`change_password`].
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<RestResponse<Value>, SdkError> {
        change_password(self.conn, self.credentials, old_password, new_password).await
    }

    /// See [`who_am_i`].
    ///
    /// # Errors
    ///
    /// Same as [`who_am_i`].
    pub async fn who_am_i(&self) -> Result<RestResponse<UserIdentity>, SdkError> {
        who_am_i(self.conn, self.credentials).await
    }
}
