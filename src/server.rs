//! HTTP server initialization and runtime setup.
//!
//! Handles the metrics recorder, quote store setup, Axum server lifecycle and
//! graceful shutdown.

use crate::application::services::{AuthService, QuoteService};
use crate::config::Config;
use crate::domain::content_validator::ContentValidator;
use crate::infrastructure::persistence::SqliteQuoteRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use metrics_process::Collector;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Prometheus metrics recorder
/// - Content validator (built-in lexicon plus `BLOCKED_TERMS`)
/// - SQLite quote store (schema and seed data)
/// - Axum HTTP server
///
/// After Ctrl-C or SIGTERM, in-flight requests get `SHUTDOWN_TIMEOUT`
/// seconds to finish before the server stops waiting. The store is closed
/// in both cases.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let metrics = install_metrics_recorder()?;

    let validator = ContentValidator::with_extra_terms(&config.blocked_terms)
        .context("Failed to build content validator")?;

    let repository = Arc::new(
        SqliteQuoteRepository::initialize(&config.store_config())
            .await
            .context("Failed to initialize quote store")?,
    );

    let quote_service = Arc::new(QuoteService::new(repository, validator));
    let auth_service = Arc::new(AuthService::new(config.admin_token_hash.clone()));

    if !auth_service.is_enforced() {
        tracing::warn!("ADMIN_TOKEN_HASH is not set; anyone can delete quotes");
    }

    let state = AppState::new(quote_service.clone(), auth_service, Some(metrics));
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let (signal_tx, mut signal_rx) = watch::channel(false);
    let server = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(true);
    });

    let grace = Duration::from_secs(config.shutdown_timeout);
    let forced = async move {
        if signal_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    let outcome = tokio::select! {
        result = server.into_future() => result.map_err(anyhow::Error::from),
        () = forced => {
            tracing::warn!(
                timeout_secs = grace.as_secs(),
                "In-flight requests did not finish in time, forcing shutdown"
            );
            Ok(())
        }
    };

    quote_service.shutdown().await;
    tracing::info!("Server stopped");

    outcome
}

/// Installs the global Prometheus recorder.
///
/// A background task refreshes the process series (CPU, memory, open file
/// descriptors) and keeps histograms trimmed.
fn install_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    let collector = process_collector();
    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            collector.collect();
            upkeep.run_upkeep();
        }
    });

    Ok(handle)
}

/// Process metrics collector, registered with the current recorder.
fn process_collector() -> Collector {
    let collector = Collector::default();
    collector.describe();
    collector.collect();
    collector
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
