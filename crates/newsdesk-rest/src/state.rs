//! Application state for Axum handlers.

use newsdesk_service::{CacheStore, NewsService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<dyn NewsService>,
    pub cache: Arc<dyn CacheStore>,
    /// Process start, for the uptime reported by the health check.
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(news_service: Arc<dyn NewsService>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            news_service,
            cache,
            started_at: Instant::now(),
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn NewsService> + HasComponent<dyn CacheStore>,
    {
        Self::new(module.resolve(), module.resolve())
    }
}
