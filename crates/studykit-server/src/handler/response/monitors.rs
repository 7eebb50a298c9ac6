//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Health status response.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the server accepts generation requests.
    pub is_healthy: bool,
    /// Configured model provider.
    pub provider: String,
    /// Configured model name.
    pub model: String,
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
}
