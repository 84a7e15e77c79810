//! # Newsdesk Server Library
//!
//! Dependency injection wiring and startup utilities for the Newsdesk
//! server binary.

pub mod di;
pub mod startup;
