mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod seed;
mod store;

use std::sync::Arc;

use anyhow::Context;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::DbMovieStore};

pub struct AppState<S> {
    pub store: S,
    pub route_prefix: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movies_api=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;

    if config.reset_db {
        let entries = seed::load_dataset(&config.dataset_path).await?;
        let inserted = seed::reset_and_seed(&db, entries).await.context("seeding movies")?;
        tracing::info!(inserted = inserted, path = %config.dataset_path.display(), "database reset");
    }

    let state = Arc::new(AppState {
        store: DbMovieStore::new(db),
        route_prefix: config.route_prefix.clone(),
    });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, prefix = %config.route_prefix, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
