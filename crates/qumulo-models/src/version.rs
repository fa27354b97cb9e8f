//! Appliance version resource (`GET /v1/version`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Software version reported by the appliance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VersionInfo {
    /// Release identifier (e.g. `"Qumulo Core 2.0.0"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    /// Build number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    /// Build flavor (`release`, `debug`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    /// Human-readable build date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
