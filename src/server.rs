use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
};

/// Start the homepro server
///
/// This function:
/// 1. Initializes metrics
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application
/// 4. Serves requests until a shutdown signal arrives
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()))
    } else {
        None
    };

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path)?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState {
        config: config_swap,
        http_client: reqwest::Client::new(),
    };

    let app = create_router(&config, app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting homepro on {}", addr);
    info!(
        default_model = %config.render.default_model,
        pro_enabled = config.gemini.has_pro_key(),
        metrics_enabled = config.metrics.enabled,
        "Configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    config: &Config,
    app_state: AppState,
    metrics_handle: Option<Arc<metrics_exporter_prometheus::PrometheusHandle>>,
) -> Router {
    let api_routes = Router::new()
        .route("/api/site", get(handlers::site::site_content))
        .route("/api/estimate", post(handlers::estimate::handle_estimate))
        .route("/api/render", post(handlers::render::handle_render))
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::status::health_check))
        .route("/ready", get(handlers::status::readiness_check));

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route(&config.metrics.endpoint, get(handlers::status::metrics))
                .with_state(handle),
        );
    }

    router
        .merge(api_routes)
        // Uploads arrive base64-encoded inside JSON
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
