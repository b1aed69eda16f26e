//! Gravity list API server.
//!
//! Run from repo root: `cargo run -p gravity-server`
//! Configure with `GRAVITY_*` variables (see `gravity_api::Settings`), optionally from a `.env` file.

use gravity_api::{app, connect, ensure_gravity_tables, AppState, Settings, SqliteStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads `.env` too, so RUST_LOG set there applies below.
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gravity_api=info,tower_http=info")),
        )
        .init();

    let pool = connect(&settings).await?;
    ensure_gravity_tables(&pool).await?;
    if settings.api_key.is_none() {
        tracing::warn!("GRAVITY_API_KEY not set: list endpoints accept unauthenticated requests");
    }

    let state = AppState::new(Arc::new(SqliteStore::new(pool)), settings.authorizer());
    let router = app(state, &settings);

    let listener = TcpListener::bind(settings.bind.as_str()).await?;
    tracing::info!("gravity list API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
