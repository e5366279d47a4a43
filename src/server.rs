//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, migrations, service wiring, and Axum
//! server lifecycle.

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::persistence::{MemoryMappingRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store: PostgreSQL pool + migrations when a database is
///   configured, otherwise the in-memory store
/// - Shortener service
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository: Arc<dyn MappingRepository> = if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(database_url)
            .await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        Arc::new(PgMappingRepository::new(Arc::new(pool)))
    } else {
        tracing::warn!("No database configured, mappings will not survive a restart");
        Arc::new(MemoryMappingRepository::new())
    };

    let shortener_service = Arc::new(ShortenerService::new(
        repository,
        config.initial_code_length,
        config.max_code_length_increase,
        config.base_short_url.clone(),
    ));

    let state = AppState { shortener_service };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
