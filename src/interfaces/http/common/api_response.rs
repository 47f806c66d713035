//! Common API response envelope

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper
///
/// Every REST endpoint answers with this envelope.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "...", "details": {...}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Human-readable error, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error details (`code`, offending `slots`)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
