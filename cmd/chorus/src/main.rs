//! # Chorus Binary
//!
//! The entry point that assembles the service from its adapters.

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use api_adapters::{router, AppState};
use auth_adapters::JwtIdentityProvider;
use configs::AppConfig;
use domains::traits::{IdentityProvider, ItemStore};
use services::PostService;
use storage_adapters::{MemoryItemStore, RetryingStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Configuration
    let config = AppConfig::load().context("loading configuration")?;

    // 2. Storage: the in-process table behind the bounded-retry decorator
    let store: Arc<dyn ItemStore> = Arc::new(RetryingStore::new(MemoryItemStore::new()));

    // 3. Auth: HS256 bearer tokens
    let auth: Arc<dyn IdentityProvider> =
        Arc::new(JwtIdentityProvider::new(&config.auth.jwt_secret));

    // 4. Service + HTTP surface
    let state = AppState {
        posts: PostService::new(store),
        auth,
    };
    let app = router(state).layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "chorus listening");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
