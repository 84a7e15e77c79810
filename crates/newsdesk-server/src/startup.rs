//! Server startup utilities.

use newsdesk_resilience::ClientRateLimiter;
use newsdesk_service::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::{signal, task::JoinHandle};
use tracing::{debug, error, info, warn};

/// How often idle rate limiter buckets are dropped.
pub const RATE_LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Prints server startup information.
pub fn print_startup_info(addr: &str, environment: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("News Reader API ({})", environment);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/api/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("{}", separator);
}

/// Logs whether the cache answers. Never fails startup.
pub async fn check_cache(cache: &Arc<dyn CacheStore>) -> bool {
    match cache.ping().await {
        Ok(true) => {
            info!("Redis connected");
            true
        }
        Ok(false) => {
            info!("Running without Redis cache");
            false
        }
        Err(e) => {
            warn!(error = %e, "Redis unavailable, requests will bypass the cache");
            false
        }
    }
}

/// Periodically drops buckets of clients that are back at full capacity.
pub fn spawn_rate_limiter_cleanup(limiter: ClientRateLimiter, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.retain_recent();
            debug!(clients = limiter.tracked_clients(), "Rate limiter buckets pruned");
        }
    })
}

/// Resolves when SIGINT or SIGTERM is received.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
