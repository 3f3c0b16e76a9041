use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use shared::llm::{ModelCatalog, PathGenerator};
use tower_http::cors::{Any, CorsLayer};

mod errors;
mod generate;
mod health;
mod models;
mod static_files;

#[derive(Clone)]
pub struct AppState {
    pub has_api_key: bool,
    pub generator: Arc<PathGenerator>,
    pub catalogs: Arc<Vec<Box<dyn ModelCatalog>>>,
}

pub fn build_router(app_state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/models", get(models::list_models))
        .route("/api/generate-path", post(generate::generate_path))
        .fallback_service(static_files::spa_site(public_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}
