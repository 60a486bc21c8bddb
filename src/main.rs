//! Bookshelf - book catalog and review service
//! Public catalog reads, registration/login, JWT-gated review writes

use anyhow::{Context, Result};
use bookshelf_backend::{
    api::{self, AppState},
    auth::{AuthState, JwtHandler, UserStore},
    config::{self, Config},
    store::{CatalogStore, ReviewStore},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env();
    init_tracing();

    let config = Config::from_env()?;

    info!("🚀 Bookshelf starting");

    let catalog = match &config.catalog_path {
        Some(path) => CatalogStore::from_json_file(path)?,
        None => CatalogStore::seeded(),
    };
    info!("📚 Catalog ready with {} books", catalog.len());

    let user_store = Arc::new(UserStore::with_cost(config.bcrypt_cost));
    let jwt_handler = Arc::new(JwtHandler::with_ttl(
        config.jwt_secret.clone(),
        config.jwt_ttl_secs,
    )?);
    let auth_state = AuthState::new(user_store, jwt_handler);

    info!(
        "🔐 Authentication initialized (token ttl {}s)",
        config.jwt_ttl_secs
    );

    let app_state = AppState::new(Arc::new(catalog), Arc::new(ReviewStore::new()));
    let app = api::router(app_state, auth_state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Bookshelf stopped");
    Ok(())
}

/// Initialize tracing, honoring RUST_LOG when set
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bookshelf_backend=debug,bookshelf=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
