//! Armory Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use armory_engine::api;
use armory_engine::infrastructure::{armory::ArmoryClient, config::EngineConfig};
use armory_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "armory_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Armory Engine");

    let config = EngineConfig::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("LOSTARK_API_KEY is not set; character lookups will fail with 500");
    }

    tracing::info!(
        base_url = %config.armory_base_url,
        timeout_secs = config.armory_timeout.as_secs(),
        "Armory client configured"
    );
    let armory = Arc::new(ArmoryClient::new(
        config.armory_base_url.clone(),
        config.armory_timeout,
    )?);

    let app = Arc::new(App::new(
        armory,
        config.api_key.clone(),
        config.armory_timeout,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    // The frontend only issues simple GETs.
    let mut cors = CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
