//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, builds the shortening service and drives the
//! Axum server lifecycle including graceful shutdown.

use crate::application::services::{DynShortenerService, ShortenerService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::metrics::PrometheusMetrics;
use crate::infrastructure::persistence::{InMemoryMappingRepository, PgMappingRepository, pg_pool};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::OsCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store (in-memory, or PostgreSQL pool with migrations applied)
/// - Prometheus registry for the engine counters
/// - Shortening service with the configured retry budget
/// - Axum HTTP server
///
/// Returns after a shutdown signal once in-flight requests have drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, pool) = build_repository(&config).await?;

    let metrics =
        Arc::new(PrometheusMetrics::new().context("Failed to register Prometheus metrics")?);

    let shortener: Arc<DynShortenerService> = Arc::new(
        ShortenerService::new(repository, OsCodeGenerator)
            .with_max_attempts(config.max_attempts()?)
            .with_metrics(metrics.clone()),
    );

    let state = AppState::new(shortener, config.base_url.clone(), metrics);
    let app = app_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the store selected by `STORAGE_BACKEND`.
///
/// The pool is returned alongside so it can be closed on shutdown.
async fn build_repository(
    config: &Config,
) -> Result<(Arc<dyn MappingRepository>, Option<PgPool>)> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok((Arc::new(InMemoryMappingRepository::new()), None))
        }
        StorageBackend::Postgres => {
            let pool = pg_pool::connect(config).await?;
            tracing::info!("Connected to database");

            pg_pool::migrate(&pool).await?;
            tracing::info!("Migrations applied");

            let repository = PgMappingRepository::new(Arc::new(pool.clone()));
            Ok((Arc::new(repository), Some(pool)))
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
