//! Per-client rate limiting middleware.

use crate::responses::AppError;
use axum::{
    body::Body,
    extract::{ConnectInfo, OriginalUri, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use newsdesk_resilience::ClientRateLimiter;
use std::net::SocketAddr;

/// Paths that are never rate limited.
pub const RATE_LIMIT_EXEMPT: &[&str] = &["/api/health"];

/// Identifies the caller: first `X-Forwarded-For` hop, then the peer
/// address, then `"unknown"`.
pub fn client_key<B>(request: &Request<B>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

/// Rejects callers over their quota with 429 Too Many Requests.
pub async fn rate_limit_middleware(
    State(limiter): State<ClientRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Nested routers see a stripped path.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().path(), |OriginalUri(uri)| uri.path());
    if RATE_LIMIT_EXEMPT.contains(&path) {
        return next.run(request).await;
    }

    let client = client_key(&request);
    if let Err(e) = limiter.check(&client) {
        return AppError(e).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(client_key(&request), "203.0.113.7");
    }

    #[test]
    fn test_client_key_uses_peer_address() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4242))));
        assert_eq!(client_key(&request), "192.0.2.1");
    }

    #[test]
    fn test_client_key_unknown() {
        let request = Request::builder()
            .header("x-forwarded-for", " ")
            .body(())
            .unwrap();
        assert_eq!(client_key(&request), "unknown");
    }
}
