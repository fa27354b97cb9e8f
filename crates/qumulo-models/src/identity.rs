//! User resource returned by `GET /v1/who-am-i`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user, as the appliance describes it.
///
/// Equivalent to fetching `/v1/users/<id>` for the caller's own id. Every
/// field is optional because appliance versions differ in what they
/// report; anything not modelled here is kept in [`Self::extra`].
///
/// # Examples
///
/// ```
/// use qumulo_models::UserIdentity;
///
/// let me: UserIdentity = serde_json::from_str(
///     r#"{"id":"500","name":"admin","smb_sid":"S-1-5-21"}"#,
/// ).unwrap();
/// assert_eq!(me.name.as_deref(), Some("admin"));
/// assert!(me.extra.contains_key("smb_sid"));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserIdentity {
    /// Appliance-local user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Login name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the user's primary group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_group: Option<String>,
    /// Windows security identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// POSIX uid, if mapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Home directory path, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
