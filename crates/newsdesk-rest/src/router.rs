//! Main application router.

use crate::{
    controllers::{health_controller, news_controller},
    middleware::{logging_middleware, rate_limit_middleware, with_security_headers},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    extract::OriginalUri,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use newsdesk_config::{RateLimitConfig, ServerConfig};
use newsdesk_core::ErrorResponse;
use newsdesk_resilience::ClientRateLimiter;
use newsdesk_service::{CacheStore, NewsService};
use serde_json::{json, Value};
use shaku::{HasComponent, Module};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the per-client limiter, or `None` when rate limiting is disabled.
#[must_use]
pub fn create_rate_limiter(config: &RateLimitConfig) -> Option<ClientRateLimiter> {
    config
        .enabled
        .then(|| ClientRateLimiter::new(config.max_requests, config.window()))
}

/// Creates the main application router.
///
/// `/api/*` routes go through `rate_limiter` when one is given; the health
/// check is exempt.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    rate_limiter: Option<ClientRateLimiter>,
) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new()
        .nest("/news", news_controller::router())
        .merge(health_controller::router());
    let api_router = match rate_limiter {
        Some(limiter) => {
            info!(
                max_requests = limiter.max_requests(),
                window_secs = limiter.window().as_secs(),
                "Rate limiting enabled"
            );
            api_router.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        }
        None => api_router,
    };

    let router = Router::new()
        .route("/", get(root))
        .nest("/api", api_router)
        .fallback(not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let router = with_security_headers(router)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with news endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates the router from a Shaku module.
pub fn create_router_from_module<M>(
    module: &M,
    server_config: &ServerConfig,
    rate_limit_config: &RateLimitConfig,
) -> (Router, Option<ClientRateLimiter>)
where
    M: Module + HasComponent<dyn NewsService> + HasComponent<dyn CacheStore>,
{
    let limiter = create_rate_limiter(rate_limit_config);
    let router = create_router(AppState::from_module(module), server_config, limiter.clone());
    (router, limiter)
}

/// Creates a CORS layer for the configured origin.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let origin = server_config.cors_origin.trim();
    if origin == "*" {
        // Credentials cannot be combined with a wildcard origin.
        return cors.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(origin) => cors.allow_origin(origin).allow_credentials(true),
        Err(e) => {
            warn!(origin = %origin, error = %e, "Ignoring unusable CORS origin");
            cors
        }
    }
}

/// Root endpoint handler.
async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "News Reader API",
        "version": "1.0.0",
        "endpoints": {
            "health": "/api/health",
            "news": {
                "topHeadlines": "/api/news/top-headlines",
                "search": "/api/news/search",
                "categories": "/api/news/categories/:category",
            },
        },
    }))
}

/// Fallback for unknown endpoints.
async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found").with_path(uri.path())),
    )
}
