//! Products API - REST server for the product catalog

use core_config::cache::CacheBackend;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryPolicy;
use eyre::WrapErr;
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod shutdown;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_with_retry(&config.database, RetryPolicy::default())
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db).await?;
    }

    let redis = match &config.cache.backend {
        CacheBackend::Memory => {
            info!("Caching products in process memory");
            None
        }
        CacheBackend::Redis { url } => {
            let manager = database::redis::connect_with_retry(url, RetryPolicy::default())
                .await
                .wrap_err("Failed to connect to Redis")?;
            info!("Caching products in Redis");
            Some(manager)
        }
    };

    let state = AppState {
        config: config.clone(),
        db,
        redis,
    };

    let app = api::routes(&state)?;

    let listener = tokio::net::TcpListener::bind(config.server.address())
        .await
        .wrap_err_with(|| format!("Failed to bind {}", config.server.address()))?;
    info!("Starting Products API on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .wrap_err("Server error")?;

    info!("Closing database connections");
    if let Err(e) = state.db.close().await {
        tracing::warn!(error = %e, "Failed to close database pool cleanly");
    }

    info!("Products API shutdown complete");
    Ok(())
}
