//! Result type aliases for Newsdesk.

use crate::NewsdeskError;

/// A specialized `Result` type for Newsdesk operations.
pub type NewsdeskResult<T> = Result<T, NewsdeskError>;
