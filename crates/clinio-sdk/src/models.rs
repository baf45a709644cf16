//! Wire models for the Clinio SDK.

use crate::error::ErrorEnvelope;
use serde::{Deserialize, Serialize};

/// Error payload shape the backend is expected to produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort view of an arbitrary JSON error payload.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Whether the error text mentions a tenant (case-insensitive).
    pub fn mentions_tenant(&self) -> bool {
        self.error
            .as_deref()
            .map(|error| error.to_lowercase().contains("tenant"))
            .unwrap_or(false)
    }
}

/// Payload reported by the API root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootInfo {
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Outcome of a connectivity probe. Always produced, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
}
