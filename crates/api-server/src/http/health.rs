use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use shared::models::HealthResponse;

use super::AppState;

pub(super) async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        has_api_key: state.has_api_key,
        model: state
            .generator
            .resolved_model()
            .map(|model| model.name.clone()),
    })
}
