//! Canonical REST paths of the appliance API.
//!
//! Every URI the SDK sends is taken from [`Endpoints`], so the path layout
//! is defined in exactly one place.
//!
//! # Path layout
//!
//! ```text
//! /v1/login          ← POST, open a session
//! /v1/setpassword    ← POST, change the logged-in user's password
//! /v1/who-am-i       ← GET, the logged-in user
//! /v1/users/{id}     ← GET, any user by id
//! /v1/version        ← GET, appliance software version
//! ```

/// Current API version prefix.
const VERSION: &str = "v1";

/// Central authority for REST paths.
///
/// # Examples
///
/// ```
/// use qumulo_sdk::Endpoints;
///
/// assert_eq!(Endpoints::LOGIN, "/v1/login");
/// assert_eq!(Endpoints::user("500"), "/v1/users/500");
/// ```
pub struct Endpoints;

impl Endpoints {
    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Open a session.
    pub const LOGIN: &'static str = "/v1/login";

    /// Change the password of the logged-in user.
    ///
    /// Distinct from the administrative per-user password endpoint under
    /// [`Self::user`].
    pub const SET_PASSWORD: &'static str = "/v1/setpassword";

    /// The logged-in user.
    pub const WHO_AM_I: &'static str = "/v1/who-am-i";

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    /// Appliance software version.
    pub const VERSION: &'static str = "/v1/version";

    /// A user resource by id.
    ///
    /// `GET` on the logged-in user's id returns the same document as
    /// [`Self::WHO_AM_I`].
    pub fn user(id: &str) -> String {
        format!("/{VERSION}/users/{id}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_paths() {
        assert_eq!(Endpoints::LOGIN, "/v1/login");
        assert_eq!(Endpoints::SET_PASSWORD, "/v1/setpassword");
        assert_eq!(Endpoints::WHO_AM_I, "/v1/who-am-i");
    }

    #[test]
    fn user_path() {
        assert_eq!(Endpoints::user("1"), "/v1/users/1");
    }

    #[test]
    fn all_paths_share_version_prefix() {
        let prefix = format!("/{VERSION}/");
        for path in [
            Endpoints::LOGIN,
            Endpoints::SET_PASSWORD,
            Endpoints::WHO_AM_I,
            Endpoints::VERSION,
        ] {
            assert!(path.starts_with(&prefix), "{path}");
        }
    }
}
