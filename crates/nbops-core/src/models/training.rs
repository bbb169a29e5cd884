use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants;

fn default_model_version() -> String {
    constants::DEFAULT_MODEL_VERSION.to_string()
}

/// Retraining trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub training_data_path: String,
    #[serde(default = "default_model_version")]
    pub model_version: String,
    #[serde(default)]
    pub hyperparameters: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Immediate acknowledgment of a retraining trigger, not a completion signal.
/// Completion is observable through the job identified by `job_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResponse {
    pub status: String,
    pub message: String,
    pub job_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl TrainingResponse {
    pub fn started(job_id: Uuid) -> Self {
        Self {
            status: "training_started".to_string(),
            message: "Model retraining initiated in background".to_string(),
            job_id,
            timestamp: Utc::now(),
        }
    }
}
