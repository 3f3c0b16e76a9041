use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Generative Language API surface version. The listing endpoints differ
/// between the two; model fetch and content generation only exist on v1beta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1Beta,
    V1,
}

impl ApiVersion {
    fn as_path(self) -> &'static str {
        match self {
            ApiVersion::V1Beta => "v1beta",
            ApiVersion::V1 => "v1",
        }
    }
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("gemini request timed out")]
    Timeout,
    #[error("gemini request failed: {0}")]
    RequestFailed(String),
    #[error("gemini returned status={status} code={code}")]
    Status { status: u16, code: String },
    #[error("gemini returned an invalid payload: {0}")]
    InvalidPayload(String),
}

/// One model offering as reported by the provider. Everything beyond the
/// name is carried opaquely so listings can be echoed back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// List the models visible to this credential on the given API surface.
    pub async fn list_models(
        &self,
        version: ApiVersion,
        page_size: Option<u32>,
    ) -> Result<Vec<ModelDescriptor>, GeminiError> {
        let mut request = self.client.get(self.endpoint(version, "models"));
        if let Some(page_size) = page_size {
            request = request.query(&[("pageSize", page_size)]);
        }

        let listing: ListModelsResponse = self.send(request).await?;
        Ok(listing.models)
    }

    /// Fetch one model's metadata. Used as the usability probe for a chosen
    /// identifier before the service commits to it.
    pub async fn fetch_model(&self, name: &str) -> Result<ModelDescriptor, GeminiError> {
        self.send(self.client.get(self.endpoint(ApiVersion::V1Beta, name)))
            .await
    }

    /// Single-shot content generation. Returns the concatenated text parts
    /// of the first candidate.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let path = format!("{model}:generateContent");
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response: GenerateContentResponse = self
            .send(
                self.client
                    .post(self.endpoint(ApiVersion::V1Beta, &path))
                    .json(&body),
            )
            .await?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            GeminiError::InvalidPayload("missing_candidate".to_string())
        })?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GeminiError> {
        let response = request
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GeminiError::Timeout
                } else {
                    GeminiError::RequestFailed(err.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|_| {
            GeminiError::InvalidPayload("response_body_read_failed".to_string())
        })?;

        if !status.is_success() {
            return Err(GeminiError::Status {
                status: status.as_u16(),
                code: parse_provider_error_code(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|_| GeminiError::InvalidPayload("response_json_parse_failed".to_string()))
    }

    fn endpoint(&self, version: ApiVersion, path: &str) -> String {
        format!(
            "{}/{}/{path}",
            self.config.base_url.trim_end_matches('/'),
            version.as_path()
        )
    }
}

fn parse_provider_error_code(body: &str) -> String {
    #[derive(Deserialize)]
    struct ProviderErrorEnvelope {
        error: Option<ProviderErrorDetails>,
    }

    #[derive(Deserialize)]
    struct ProviderErrorDetails {
        status: Option<String>,
        code: Option<Value>,
    }

    let Some(details) = serde_json::from_str::<ProviderErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
    else {
        return "unknown".to_string();
    };

    if let Some(status) = details.status {
        return status;
    }

    match details.code {
        Some(Value::String(code)) => code,
        Some(Value::Number(code)) => code.to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_provider_error_code;

    #[test]
    fn parse_provider_error_code_prefers_status_string() {
        let body = r#"{"error":{"code":404,"message":"not found","status":"NOT_FOUND"}}"#;
        assert_eq!(parse_provider_error_code(body), "NOT_FOUND");
    }

    #[test]
    fn parse_provider_error_code_falls_back_to_numeric_code() {
        let body = r#"{"error":{"code":429}}"#;
        assert_eq!(parse_provider_error_code(body), "429");
    }

    #[test]
    fn parse_provider_error_code_handles_unstructured_bodies() {
        assert_eq!(parse_provider_error_code("upstream exploded"), "unknown");
        assert_eq!(parse_provider_error_code("{}"), "unknown");
    }
}
