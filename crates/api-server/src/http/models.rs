use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::ModelsResponse;
use tracing::warn;

use super::{AppState, errors};

pub(super) async fn list_models(State(state): State<AppState>) -> Response {
    if !state.has_api_key {
        return errors::bad_request_response("No API key set");
    }

    let Some(catalog) = state.catalogs.first() else {
        return errors::bad_request_response("Model listing is not supported");
    };

    match catalog.list_models().await {
        Ok(models) => (
            StatusCode::OK,
            Json(ModelsResponse {
                success: true,
                models,
            }),
        )
            .into_response(),
        Err(err) => {
            warn!("model listing via {} failed: {err}", catalog.name());
            errors::internal_error_response(&err.to_string())
        }
    }
}
