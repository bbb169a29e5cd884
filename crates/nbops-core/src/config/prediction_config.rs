use serde::{Deserialize, Serialize};

use crate::constants;

/// Prediction workflow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Model version passed to the notebook. Request overrides are not consulted.
    pub model_version: String,
    /// Reject notebook output whose length differs from the input record count.
    /// Off by default: a mismatch is only logged.
    pub validate_output_length: bool,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            model_version: constants::DEFAULT_MODEL_VERSION.to_string(),
            validate_output_length: constants::DEFAULT_VALIDATE_OUTPUT_LENGTH,
        }
    }
}
