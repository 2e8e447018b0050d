use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::dispatcher::Dispatcher;
use crate::rate_limiter::{EXPIRY_MS, MAX_REQUESTS_PER_WINDOW};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub rate_limit: RateLimitStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub window_ms: u64,
    pub max_requests: usize,
    pub live_admissions: usize,
}

pub struct HealthChecker {
    started_at: Instant,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Reports liveness and how full the admission window is. Reading the
    /// window prunes it but never records an admission.
    pub fn check_health(&self, dispatcher: &Dispatcher) -> HealthStatus {
        let now = dispatcher.now_millis();

        HealthStatus {
            status: "healthy".to_string(),
            timestamp: now / 1_000,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            rate_limit: RateLimitStatus {
                window_ms: EXPIRY_MS,
                max_requests: MAX_REQUESTS_PER_WINDOW,
                live_admissions: dispatcher.rate_limiter().live_count(now),
            },
        }
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}
