//! News service implementations.
//!
//! Trait definitions live in the parent module (`news_service.rs`).

pub mod news_service_impl;

pub use news_service_impl::{NewsServiceImpl, NewsServiceImplParameters, DEFAULT_CACHE_TTL};
