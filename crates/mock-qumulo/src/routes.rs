//! HTTP handlers of the fake appliance.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use axum::extract::{Json, Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use qumulo_models::{ChangePasswordRequest, LoginRequest, LoginResponse, UserIdentity, VersionInfo};
use tracing::info;

use crate::config::ApplianceConfig;
use crate::error::ApplianceError;

/// First id handed out to configured accounts.
const FIRST_USER_ID: u64 = 500;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

struct UserRecord {
    id: u64,
    name: String,
    password: String,
}

impl UserRecord {
    fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: Some(self.id.to_string()),
            name: Some(self.name.clone()),
            primary_group: Some("513".to_string()),
            sid: Some(format!("S-1-5-21-1-2-3-{}", self.id)),
            ..UserIdentity::default()
        }
    }
}

/// State shared across all Axum handlers.
///
/// Sessions are never expired or revoked, not even by a password change;
/// the table lives as long as the router.
struct AppState {
    config: ApplianceConfig,
    /// Keyed by login name.
    users: RwLock<HashMap<String, UserRecord>>,
    /// Session key → login name.
    sessions: RwLock<HashMap<String, String>>,
}

impl AppState {
    fn new(config: ApplianceConfig) -> Self {
        let users = config
            .users
            .iter()
            .zip(FIRST_USER_ID..)
            .map(|(account, id)| {
                let record = UserRecord {
                    id,
                    name: account.name.clone(),
                    password: account.password.clone(),
                };
                (account.name.clone(), record)
            })
            .collect();

        Self {
            config,
            users: RwLock::new(users),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.config.response_delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// Resolve the bearer key in `headers` to a login name.
    fn session_user(&self, headers: &HeaderMap) -> Result<String, ApplianceError> {
        let key = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApplianceError::Unauthorized("missing bearer credentials".into()))?;

        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| ApplianceError::Unauthorized("unknown session key".into()))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /v1/login` — check the password and issue a session key.
///
/// `issue` is stamped with the appliance clock plus the configured skew.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApplianceError> {
    state.pause().await;

    let authenticated = state
        .users
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&req.username)
        .is_some_and(|user| user.password == req.password);
    if !authenticated {
        return Err(ApplianceError::Unauthorized(
            "invalid username or password".into(),
        ));
    }

    let key = uuid::Uuid::new_v4().simple().to_string();
    state
        .sessions
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key.clone(), req.username.clone());

    info!(username = %req.username, "session opened");

    Ok(Json(LoginResponse {
        key_id: uuid::Uuid::new_v4().to_string(),
        key,
        algorithm: "hmac-sha256".to_string(),
        issue: Utc::now().timestamp() + state.config.clock_skew_secs,
        extra: serde_json::Map::new(),
    }))
}

/// `POST /v1/setpassword` — change the session user's own password.
async fn set_password(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApplianceError> {
    state.pause().await;
    let username = state.session_user(&headers)?;

    let mut users = state.users.write().unwrap_or_else(PoisonError::into_inner);
    let user = users
        .get_mut(&username)
        .ok_or_else(|| ApplianceError::NotFound(format!("no such user: {username}")))?;
    if user.password != req.old_password {
        return Err(ApplianceError::Unauthorized("old password is incorrect".into()));
    }
    user.password = req.new_password;

    info!(%username, "password changed");
    Ok(StatusCode::OK)
}

/// `GET /v1/who-am-i` — the session user.
async fn who_am_i(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserIdentity>, ApplianceError> {
    state.pause().await;
    let username = state.session_user(&headers)?;

    state
        .users
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&username)
        .map(|user| Json(user.identity()))
        .ok_or_else(|| ApplianceError::NotFound(format!("no such user: {username}")))
}

/// `GET /v1/users/{id}` — any user by id.
async fn get_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<UserIdentity>, ApplianceError> {
    state.pause().await;
    state.session_user(&headers)?;

    state
        .users
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .values()
        .find(|user| user.id.to_string() == id)
        .map(|user| Json(user.identity()))
        .ok_or_else(|| ApplianceError::NotFound(format!("no such user id: {id}")))
}

/// `GET /v1/version` — unauthenticated.
async fn version(State(state): State<Arc<AppState>>) -> Json<VersionInfo> {
    state.pause().await;
    Json(VersionInfo {
        revision_id: Some(state.config.revision_id.clone()),
        build_id: Some("0".to_string()),
        flavor: Some("release".to_string()),
        build_date: Some(Utc::now().format("%Y-%m-%d").to_string()),
        ..VersionInfo::default()
    })
}

/// Build the fake appliance router.
pub fn router(config: ApplianceConfig) -> Router {
    let state = Arc::new(AppState::new(config));

    Router::new()
        .route("/v1/login", post(login))
        .route("/v1/setpassword", post(set_password))
        .route("/v1/who-am-i", get(who_am_i))
        .route("/v1/users/{id}", get(get_user))
        .route("/v1/version", get(version))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserAccount;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        TestServer::new(router(ApplianceConfig::default())).unwrap()
    }

    async fn login_key(server: &TestServer, username: &str, password: &str) -> String {
        let resp = server
            .post("/v1/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        resp.assert_status_ok();
        resp.json::<LoginResponse>().key
    }

    #[tokio::test]
    async fn login_returns_key_material_with_skewed_issue() {
        let server = server();
        let resp = server
            .post("/v1/login")
            .json(&json!({ "username": "admin", "password": "admin" }))
            .await;
        resp.assert_status_ok();

        let body: LoginResponse = resp.json();
        assert!(!body.key.is_empty());
        assert!(!body.key_id.is_empty());
        assert_eq!(body.algorithm, "hmac-sha256");
        assert!(body.issue > Utc::now().timestamp() + 3600);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let server = server();
        let resp = server
            .post("/v1/login")
            .json(&json!({ "username": "admin", "password": "nope" }))
            .await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = resp.json();
        assert_eq!(body["error_class"], "authentication_error");
    }

    #[tokio::test]
    async fn who_am_i_requires_session() {
        let server = server();
        server
            .get("/v1/who-am-i")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/v1/who-am-i")
            .authorization_bearer("not-a-session")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn who_am_i_matches_user_resource() {
        let server = TestServer::new(router(ApplianceConfig::default().with_users(vec![
            UserAccount::new("admin", "admin"),
            UserAccount::new("guest", "guest"),
        ])))
        .unwrap();
        let key = login_key(&server, "guest", "guest").await;

        let me: UserIdentity = server
            .get("/v1/who-am-i")
            .authorization_bearer(&key)
            .await
            .json();
        assert_eq!(me.name.as_deref(), Some("guest"));
        assert_eq!(me.id.as_deref(), Some("501"));

        let by_id: UserIdentity = server
            .get("/v1/users/501")
            .authorization_bearer(&key)
            .await
            .json();
        assert_eq!(me, by_id);
    }

    #[tokio::test]
    async fn set_password_checks_old_password() {
        let server = server();
        let key = login_key(&server, "admin", "admin").await;

        server
            .post("/v1/setpassword")
            .authorization_bearer(&key)
            .json(&json!({ "old_password": "wrong", "new_password": "x" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        // Old password still valid.
        login_key(&server, "admin", "admin").await;
    }

    #[tokio::test]
    async fn set_password_changes_own_password() {
        let server = server();
        let key = login_key(&server, "admin", "admin").await;

        server
            .post("/v1/setpassword")
            .authorization_bearer(&key)
            .json(&json!({ "old_password": "admin", "new_password": "n3w" }))
            .await
            .assert_status_ok();

        server
            .post("/v1/login")
            .json(&json!({ "username": "admin", "password": "admin" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        login_key(&server, "admin", "n3w").await;
    }

    #[tokio::test]
    async fn password_change_keeps_existing_sessions() {
        let server = server();
        let key = login_key(&server, "admin", "admin").await;

        server
            .post("/v1/setpassword")
            .authorization_bearer(&key)
            .json(&json!({ "old_password": "admin", "new_password": "n3w" }))
            .await
            .assert_status_ok();

        server
            .get("/v1/who-am-i")
            .authorization_bearer(&key)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn version_is_public() {
        let server = server();
        let v: VersionInfo = server.get("/v1/version").await.json();
        assert_eq!(v.revision_id.as_deref(), Some("Qumulo Core (mock)"));
    }

    #[tokio::test]
    async fn unknown_user_id_is_not_found() {
        let server = server();
        let key = login_key(&server, "admin", "admin").await;
        server
            .get("/v1/users/9999")
            .authorization_bearer(&key)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
