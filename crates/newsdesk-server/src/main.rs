//! # Newsdesk Server
//!
//! Entry point for the news reader API.

use newsdesk_config::{AppConfig, ConfigLoader};
use newsdesk_core::{telemetry::init_telemetry, NewsdeskError, NewsdeskResult};
use newsdesk_rest::create_router_from_module;
use newsdesk_server::{
    di::{build_news_module, NewsResolver},
    startup::{
        check_cache, print_startup_info, shutdown_signal, spawn_rate_limiter_cleanup,
        RATE_LIMITER_CLEANUP_INTERVAL,
    },
};
use std::net::SocketAddr;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _telemetry = match init_telemetry(&config.observability) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Newsdesk server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> NewsdeskResult<()> {
    info!("Environment: {}", config.app.environment);

    let module = build_news_module(&config)?;
    check_cache(&module.cache()).await;

    let (router, limiter) =
        create_router_from_module(module.as_ref(), &config.server, &config.rate_limit);
    let cleanup = limiter.map(|l| spawn_rate_limiter_cleanup(l, RATE_LIMITER_CLEANUP_INTERVAL));

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NewsdeskError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&addr, &config.app.environment);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| NewsdeskError::Internal(format!("Server error: {}", e)))?;

    if let Some(cleanup) = cleanup {
        cleanup.abort();
    }

    info!("Server shutdown complete");
    Ok(())
}
