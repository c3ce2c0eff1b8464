//! Failure cooldown for the remote compile service.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! When a compile attempt fails at the transport level, further
//! attempts are suppressed for a window of time so a known-down
//! service is not hammered. The cooldown is a single shared timestamp:
//! process-wide, mutated only on timeout-class failures, cleared
//! lazily once expired.
//!
//! The clock is injected so tests can control time. A race between
//! `is_active` and `activate` from two concurrently failing calls is
//! acceptable: worst case is one avoidable extra network attempt.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Circuit-breaker state recording when the remote endpoint may next
/// be contacted.
///
/// Shared across compile runs for the life of the process; create one
/// and hand out references.
pub struct FailureCooldown {
    clock: Arc<dyn Clock>,
    expires_at: Mutex<Option<Instant>>,
}

impl FailureCooldown {
    /// Create an inactive cooldown using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an inactive cooldown using the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            expires_at: Mutex::new(None),
        }
    }

    /// Whether the cooldown window is currently in effect.
    ///
    /// An expired record is cleared as a side effect.
    pub fn is_active(&self) -> bool {
        let mut expires_at = self.expires_at.lock().unwrap();
        match *expires_at {
            Some(expiry) if self.clock.now() < expiry => true,
            Some(_) => {
                *expires_at = None;
                false
            }
            None => false,
        }
    }

    /// Start (or restart) the cooldown window, overwriting any prior
    /// expiry.
    pub fn activate(&self, duration: Duration) {
        let expiry = self.clock.now() + duration;
        *self.expires_at.lock().unwrap() = Some(expiry);
    }
}

impl Default for FailureCooldown {
    fn default() -> Self {
        Self::new()
    }
}
