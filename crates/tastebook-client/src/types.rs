//! Wire types returned by the tastebook API.

use serde::Deserialize;

/// The `{ success, data, message, error }` wrapper around every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload on success.
    pub data: Option<T>,
    /// Informational message on success.
    pub message: Option<String>,
    /// Error message on failure.
    pub error: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Whether the store handle is open.
    pub store_connected: bool,
}
