//! HTTP middleware.

mod logging;
mod rate_limit;
mod security_headers;

pub use logging::*;
pub use rate_limit::*;
pub use security_headers::*;
