//! surfsup - a read-only JSON API over a SQLite climate dataset
//!
//! This is the main entry point for the surfsup application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use surfsup::{build_router, init_tracing, log_dataset_stats, log_error};
use surfsup::{AppState, Config, Result, SurfsUpError};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;
    init_tracing(&config.log_level);

    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }

    let runtime = runtime.build().map_err(|e| {
        error!("Failed to build runtime: {}", e);
        SurfsUpError::Io(e)
    })?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    info!("Opening dataset: {:?}", config.database.path);

    // Open the dataset and check its schema
    let app_state = AppState::open(config.clone()).await.map_err(|e| {
        log_error(&e, "dataset open");
        e
    })?;

    let summary = app_state.db.session().await?.dataset_summary().await?;
    log_dataset_stats(&config.database.path.display().to_string(), &summary);

    // Wrap in Arc for sharing
    let state = Arc::new(app_state);
    let app = build_router(Arc::clone(&state));

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsUpError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server is ready to accept connections");

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    state.db.close().await;
    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
