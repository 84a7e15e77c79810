//! # Newsdesk REST
//!
//! Axum HTTP surface: news and health routes, request sanitization and
//! validation, per-client rate limiting, security headers, and OpenAPI docs.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use responses::*;
pub use router::*;
pub use state::*;
