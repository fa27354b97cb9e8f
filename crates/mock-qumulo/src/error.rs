//! Error responses of the fake appliance.
//!
//! [`ApplianceError`] implements [`axum::response::IntoResponse`] and
//! renders the appliance's error document:
//! `{"module": ..., "error_class": ..., "description": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failures a handler can report.
#[derive(Debug, thiserror::Error)]
pub enum ApplianceError {
    /// Missing or unknown session key, or wrong password.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl ApplianceError {
    fn error_class(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "authentication_error",
            Self::NotFound(_) => "not_found_error",
        }
    }
}

impl IntoResponse for ApplianceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::warn!(%status, error = %self, "request rejected");
        let body = json!({
            "module": "mock-qumulo",
            "error_class": self.error_class(),
            "description": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
