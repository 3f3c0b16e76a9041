use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::client::ModelDescriptor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningModule {
    pub title: String,
    pub duration: String,
    pub description: String,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Mock,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePathRequest {
    #[serde(default)]
    pub skills: Option<String>,
}

/// Successful generation payload. Failures are carried by [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    pub mode: GenerationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub has_api_key: bool,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub success: bool,
    pub models: Vec<ModelDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
