//! Request dispatch: one HTTP round-trip per call.
//!
//! The API modules ([`auth`](crate::auth), [`version`](crate::version))
//! never touch HTTP directly. They build a method, a URI and an optional
//! JSON body and hand them to a [`RestDispatch`] implementation, which
//! performs the call and returns the decoded body with its `ETag`.
//!
//! [`HttpConnection`] is the production implementation over `reqwest`.

use std::future::Future;

use reqwest::header::{ACCEPT, AUTHORIZATION, ETAG};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::connection::ConnectionInfo;
use crate::credentials::Credentials;
use crate::error::SdkError;

pub use reqwest::Method;

const USER_AGENT: &str = concat!("qumulo-sdk/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// RestResponse
// ---------------------------------------------------------------------------

/// A decoded response body together with the resource version tag.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse<T> {
    /// Response body.
    pub data: T,
    /// Value of the `ETag` header, if the appliance sent one.
    pub etag: Option<String>,
}

impl<T> RestResponse<T> {
    /// Drop the etag and keep the body.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl RestResponse<Value> {
    /// Deserialize the JSON body into a typed value, keeping the etag.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Serialization`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<RestResponse<T>, SdkError> {
        Ok(RestResponse {
            data: serde_json::from_value(self.data)?,
            etag: self.etag,
        })
    }
}

// ---------------------------------------------------------------------------
// RestDispatch
// ---------------------------------------------------------------------------

/// Performs a single authenticated REST call.
///
/// Implementations are bound to one appliance at construction time. They
/// must fail (not hang) when their configured timeouts elapse, and must
/// report non-2xx statuses as [`SdkError::Protocol`]. Failures are returned
/// as-is; nothing is retried.
pub trait RestDispatch {
    /// Send `method uri` with an optional JSON `body`.
    ///
    /// `credentials`, when present, authenticate the request.
    fn rest_request(
        &self,
        credentials: Option<&Credentials>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<RestResponse<Value>, SdkError>> + Send;
}

// ---------------------------------------------------------------------------
// HttpConnection
// ---------------------------------------------------------------------------

/// [`RestDispatch`] over HTTPS (or HTTP for test servers).
///
/// Wraps a single `reqwest` client configured from a [`ConnectionInfo`].
/// Cloning is cheap and clones share the underlying client.
#[derive(Debug, Clone)]
pub struct HttpConnection {
    http: reqwest::Client,
    base_url: String,
    info: ConnectionInfo,
}

impl HttpConnection {
    /// Build the HTTP client for `info`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] if the TLS backend cannot be initialised.
    pub fn new(info: &ConnectionInfo) -> Result<Self, SdkError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(info.accept_invalid_certs);
        if let Some(timeout) = info.timeout {
            builder = builder.connect_timeout(timeout).read_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SdkError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: info.base_url(),
            info: info.clone(),
        })
    }

    /// The configuration this connection was built from.
    pub fn info(&self) -> &ConnectionInfo {
        &self.info
    }
}

impl RestDispatch for HttpConnection {
    async fn rest_request(
        &self,
        credentials: Option<&Credentials>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<RestResponse<Value>, SdkError> {
        let url = format!("{}{uri}", self.base_url);
        debug!(%method, %url, authenticated = credentials.is_some(), "sending request");

        let mut req = self
            .http
            .request(method, &url)
            .header(ACCEPT, "application/json");
        if let Some(creds) = credentials {
            req = req.header(AUTHORIZATION, creds.authorization_header());
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        let etag = res
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = res.text().await?;

        debug!(%url, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(SdkError::Protocol {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(RestResponse { data, etag })
    }
}

/// Pull a human-readable message out of an error body.
///
/// The appliance reports errors as `{"description": ...}`; some proxies
/// use `{"error": ...}`. Anything else is returned verbatim.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("description")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// One call seen by [`RecordingDispatch`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub credentials: Option<Credentials>,
        pub method: Method,
        pub uri: String,
        pub body: Option<Value>,
    }

    /// In-memory dispatch that records calls and replays canned replies.
    #[derive(Default)]
    pub struct RecordingDispatch {
        calls: Mutex<Vec<RecordedCall>>,
        replies: Mutex<VecDeque<Result<RestResponse<Value>, SdkError>>>,
    }

    impl RecordingDispatch {
        pub fn replying(data: Value) -> Self {
            let dispatch = Self::default();
            dispatch.push_reply(Ok(RestResponse {
                data,
                etag: Some("etag".into()),
            }));
            dispatch
        }

        pub fn push_reply(&self, reply: Result<RestResponse<Value>, SdkError>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RestDispatch for RecordingDispatch {
        async fn rest_request(
            &self,
            credentials: Option<&Credentials>,
            method: Method,
            uri: &str,
            body: Option<Value>,
        ) -> Result<RestResponse<Value>, SdkError> {
            self.calls.lock().unwrap().push(RecordedCall {
                credentials: credentials.cloned(),
                method,
                uri: uri.to_string(),
                body,
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(RestResponse {
                    data: Value::Null,
                    etag: None,
                }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_description() {
        let body = r#"{"module":"auth","error_class":"x","description":"bad login"}"#;
        assert_eq!(error_message(body), "bad login");
    }

    #[test]
    fn error_message_falls_back_to_error_field() {
        assert_eq!(error_message(r#"{"error":"nope"}"#), "nope");
    }

    #[test]
    fn error_message_keeps_plain_text() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn decode_keeps_etag() {
        let resp = RestResponse {
            data: json!({ "revision_id": "1.2.3" }),
            etag: Some("abc".into()),
        };
        let typed: RestResponse<qumulo_models::VersionInfo> = resp.decode().unwrap();
        assert_eq!(typed.data.revision_id.as_deref(), Some("1.2.3"));
        assert_eq!(typed.etag.as_deref(), Some("abc"));
    }

    #[test]
    fn http_connection_keeps_info() {
        let info = ConnectionInfo::new("localhost", 8000);
        let conn = HttpConnection::new(&info).unwrap();
        assert_eq!(conn.info(), &info);
        assert_eq!(conn.base_url, "https://localhost:8000");
    }
}
