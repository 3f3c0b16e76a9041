use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::llm::GeneratePathError;
use shared::models::GeneratePathRequest;
use tracing::error;

use super::{AppState, errors};

pub(super) async fn generate_path(
    State(state): State<AppState>,
    Json(req): Json<GeneratePathRequest>,
) -> Response {
    let skills = req.skills.unwrap_or_default();

    match state.generator.generate(&skills).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err @ GeneratePathError::EmptySkills) => {
            errors::bad_request_response(&err.to_string())
        }
        Err(GeneratePathError::Provider(err)) => {
            error!("path generation failed: {err}");
            errors::internal_error_response(&err.to_string())
        }
    }
}
