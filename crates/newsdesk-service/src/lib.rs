//! # Newsdesk Service
//!
//! News orchestration for Newsdesk.
//! Reads go cache first, then to the upstream provider; fresh results are
//! validated and written back with a TTL.

pub mod articles;
pub mod cache;
pub mod dto;
pub mod fallback;
pub mod impls;
pub mod news_service;
pub mod upstream;

pub use cache::*;
pub use dto::*;
pub use news_service::*;
pub use impls::*;
pub use upstream::*;
