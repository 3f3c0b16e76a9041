use std::net::SocketAddr;
use std::sync::Arc;

use api_server::http::{self, AppState};
use shared::config::ApiConfig;
use shared::llm::{GeminiClient, PathGenerator, default_catalogs, resolve_model};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "api_server=debug,shared=debug,axum=info,tower_http=info".to_string()
        }))
        .init();

    let config = match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    let client = config.gemini.clone().map(GeminiClient::new);
    let catalogs = match &client {
        Some(client) => default_catalogs(client),
        None => Vec::new(),
    };

    // Resolution completes before the listener binds; requests only ever
    // observe the frozen outcome.
    let resolved = resolve_model(client.as_ref(), &catalogs).await;

    let app = http::build_router(
        AppState {
            has_api_key: client.is_some(),
            generator: Arc::new(PathGenerator::new(client, resolved)),
            catalogs: Arc::new(catalogs),
        },
        &config.public_dir,
    );

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .unwrap_or_else(|_| "127.0.0.1:3001".parse().expect("valid default bind addr"));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind should succeed");

    info!(
        "api server listening on {}",
        listener.local_addr().unwrap_or(addr)
    );
    axum::serve(listener, app).await.expect("server should run");
}
