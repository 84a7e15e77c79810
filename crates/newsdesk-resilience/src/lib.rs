//! # Newsdesk Resilience
//!
//! Resilience patterns for Newsdesk.
//! Provides per-client rate limiting and operation timeouts.

pub mod rate_limiter;
pub mod timeout;

pub use rate_limiter::*;
pub use timeout::*;
