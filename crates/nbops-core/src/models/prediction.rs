use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One input row: field name to scalar value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Batch of input records submitted for prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Input records, in the order predictions are expected back.
    pub data: Vec<Record>,
    /// Accepted for compatibility; the configured model version is always used.
    #[serde(default)]
    pub model_version: Option<String>,
}

/// Result of one prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// One prediction per input record, order-aligned.
    pub predictions: Vec<f64>,
    pub model_version: String,
    /// Wall-clock seconds from request start to response.
    pub execution_time: f64,
    /// Executed notebook artifact.
    pub notebook_path: String,
    pub timestamp: DateTime<Utc>,
}
