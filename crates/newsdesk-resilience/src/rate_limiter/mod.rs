//! Per-client rate limiter.
//!
//! Each client key gets its own bucket allowing `max_requests` per window.
//! Spent capacity replenishes gradually across the window rather than all at
//! once at a window boundary.

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use newsdesk_core::NewsdeskError;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Keyed rate limiter, one bucket per client identifier.
pub struct ClientRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    max_requests: u32,
    window: Duration,
}

impl ClientRateLimiter {
    /// Creates a limiter allowing `max_requests` per `window` for each client.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let period = window
            .checked_div(burst.get())
            .filter(|p| !p.is_zero())
            .unwrap_or(Duration::from_nanos(1));
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(GovernorRateLimiter::keyed(quota)),
            max_requests: burst.get(),
            window,
        }
    }

    /// Records a request for `client` and checks it against the quota.
    pub fn check(&self, client: &str) -> Result<(), NewsdeskError> {
        self.limiter.check_key(&client.to_string()).map_err(|_| {
            debug!(client = %client, "Rate limit exceeded");
            NewsdeskError::RateLimitExceeded
        })
    }

    /// Drops buckets of clients that are back at full capacity.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of clients currently tracked.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Requests allowed per window.
    #[must_use]
    pub const fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Window length.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl Clone for ClientRateLimiter {
    fn clone(&self) -> Self {
        Self {
            limiter: Arc::clone(&self.limiter),
            max_requests: self.max_requests,
            window: self.window,
        }
    }
}

impl std::fmt::Debug for ClientRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
