use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use httplog_core::SharedSink;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};

use crate::handlers::{echo, health_check, hello};
use crate::middleware::{request_logger, response_logger};
use crate::settings::{ServerSettings, Settings};

/// Builds the application router.
///
/// The loggers are installed as route layers, so only requests that match a
/// route are logged. The request logger is the outermost of the two.
pub fn build_router(settings: &Settings, sink: SharedSink) -> Router {
    let options = settings.log.logger_options();

    let mut router = Router::new()
        .route("/", get(hello))
        .route("/echo", post(echo))
        .route("/health", get(health_check))
        .route_layer(response_logger(sink.clone()).options(options))
        .route_layer(request_logger(sink).options(options));

    if let Some(timeout) = settings.server.write_timeout() {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    }

    if let Some(timeout) = settings.server.read_timeout() {
        router = router.layer(RequestBodyTimeoutLayer::new(timeout));
    }

    router
}

/// Serves `router` on the configured address until Ctrl+C or SIGTERM.
pub async fn run_server(settings: &ServerSettings, router: Router) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    tracing::info!("Server running on: {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
