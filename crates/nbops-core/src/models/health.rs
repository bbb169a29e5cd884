use serde::{Deserialize, Serialize};

/// Liveness probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(service: &str, version: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
            version: version.to_string(),
        }
    }
}
