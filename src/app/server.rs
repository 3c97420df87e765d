use crate::app::handler::{health_handler, weather_handler, AppState};
use crate::core::{ForecastEngine, LocationResolver, TemperatureResolver};
use crate::utils::error::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub fn router<L, T>(state: AppState<L, T>) -> Router
where
    L: LocationResolver + 'static,
    T: TemperatureResolver + 'static,
{
    Router::new()
        .route("/weather", get(weather_handler::<L, T>))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn serve<L, T>(
    engine: ForecastEngine<L, T>,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> Result<()>
where
    L: LocationResolver + 'static,
    T: TemperatureResolver + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, engine, shutdown).await
}

/// Serves until `shutdown` is cancelled. Cancelling also aborts lookups that
/// are still waiting on an upstream, so they answer 500 instead of stalling
/// the graceful shutdown.
pub async fn serve_on<L, T>(
    listener: TcpListener,
    engine: ForecastEngine<L, T>,
    shutdown: CancellationToken,
) -> Result<()>
where
    L: LocationResolver + 'static,
    T: TemperatureResolver + 'static,
{
    let actual_addr = listener.local_addr()?;
    tracing::info!(bind = %actual_addr, "🚀 listening");

    let state = AppState::new(Arc::new(engine), shutdown.clone());
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Cancels `token` on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
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
                tracing::warn!("failed to listen for SIGTERM: {}", e);
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

    tracing::info!("shutdown signal received");
    token.cancel();
}
