use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// How long an admission counts against the window, in milliseconds.
pub const EXPIRY_MS: u64 = 60_000;

/// Admissions allowed within any trailing [`EXPIRY_MS`] interval.
pub const MAX_REQUESTS_PER_WINDOW: usize = 10;

/// Process-wide sliding-window admission gate.
///
/// Holds the timestamps of recent admissions, oldest first. Expired entries
/// are pruned lazily whenever the gate is consulted; nothing sweeps it in the
/// background. State lives as long as the value does and is lost on restart.
#[derive(Debug)]
pub struct RateLimiter {
    window: Mutex<VecDeque<u64>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            window: Mutex::new(VecDeque::with_capacity(MAX_REQUESTS_PER_WINDOW)),
        }
    }

    /// Admit or reject a request arriving at `now_millis`.
    ///
    /// Pruning, counting and recording happen under one lock acquisition and
    /// never yield, so concurrent callers cannot both see a free slot.
    /// A rejected request is not recorded.
    pub fn admit(&self, now_millis: u64) -> bool {
        let mut window = self.lock();
        Self::prune(&mut window, now_millis);

        if window.len() >= MAX_REQUESTS_PER_WINDOW {
            return false;
        }

        window.push_back(now_millis);
        true
    }

    /// Number of admissions still live at `now_millis`.
    pub fn live_count(&self, now_millis: u64) -> usize {
        let mut window = self.lock();
        Self::prune(&mut window, now_millis);
        window.len()
    }

    /// Drops every timestamp at least [`EXPIRY_MS`] old. Timestamps ahead of
    /// `now_millis` (wall clock stepped back) stay live.
    fn prune(window: &mut VecDeque<u64>, now_millis: u64) {
        window.retain(|&admitted| now_millis.saturating_sub(admitted) < EXPIRY_MS);
    }

    // The window is a plain list of numbers, so it is still consistent if a
    // holder panicked.
    fn lock(&self) -> MutexGuard<'_, VecDeque<u64>> {
        self.window
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
