//! # Newsdesk Config
//!
//! Configuration management for Newsdesk.
//! Supports layered configuration from TOML files, `NEWSDESK_` prefixed
//! environment variables, and the plain deployment variables (`PORT`,
//! `NEWS_API_KEY`, `REDIS_URL`, ...).

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
