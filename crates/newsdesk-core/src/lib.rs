//! # Newsdesk Core
//!
//! Core types, error definitions, and telemetry setup shared by every
//! Newsdesk crate: the article model, the paginated response envelope,
//! and cache bookkeeping records.

pub mod error;
pub mod news;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use error::*;
pub use news::*;
pub use result::*;
pub use validation::*;
