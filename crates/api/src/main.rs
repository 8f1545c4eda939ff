use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use fusion_core::catalog::Catalog;
use fusion_core::fusion::FusionEngine;
use fusion_core::gateway::GenerationGateway;
use fusion_core::upload::UploadStore;
use fusion_falai::api::FalApi;
use fusion_falai::dev::DevGateway;
use fusion_falai::gateway::FalGateway;
use fusion_falai::storage::FalUploadStore;
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fusion_api::config::ServerConfig;
use fusion_api::router::build_app_router;
use fusion_api::state::AppState;
use fusion_api::upload_store::LocalUploadStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "fusion_api=debug,fusion_core=debug,fusion_falai=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Catalog ---
    let catalog = Arc::new(Catalog::builtin().expect("Built-in catalog must be valid"));
    tracing::info!(
        characters = catalog.all_characters().len(),
        fusion_modes = catalog.all_fusion_modes().len(),
        "Catalog loaded",
    );

    // --- Gateway and upload store ---
    let (gateway, uploads): (Arc<dyn GenerationGateway>, Arc<dyn UploadStore>) =
        match FalApi::from_config(&config.fal) {
            Some(api) => (
                Arc::new(FalGateway::new(api.clone())),
                Arc::new(FalUploadStore::new(api)),
            ),
            None => {
                tracing::warn!(
                    upload_dir = %config.upload_dir.display(),
                    "FAL_KEY not set, using development gateway and local uploads",
                );
                (
                    Arc::new(DevGateway::default()),
                    Arc::new(LocalUploadStore::new(
                        config.upload_dir.clone(),
                        config.public_base_url.clone(),
                    )),
                )
            }
        };
    tracing::info!(gateway = gateway.name(), uploads = uploads.name(), "Backends selected");

    // --- App state ---
    let state = AppState {
        engine: FusionEngine::new(catalog, gateway),
        uploads,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Signalled once shutdown starts, so the drain below can be bounded.
    let draining = Arc::new(Notify::new());
    let mut server = tokio::spawn({
        let draining = Arc::clone(&draining);
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_signal().await;
                    draining.notify_one();
                })
                .await
        }
    });

    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
        }
        () = draining.notified() => {
            let drain = Duration::from_secs(config.shutdown_timeout_secs);
            match tokio::time::timeout(drain, server).await {
                Ok(result) => result.expect("Server task panicked").expect("Server error"),
                Err(_) => tracing::warn!(
                    timeout_secs = config.shutdown_timeout_secs,
                    "In-flight requests did not drain before the shutdown timeout",
                ),
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
