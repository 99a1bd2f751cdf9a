// rfpoller/src/platform/timer.rs
//! Millisecond software timers for guard times and inter-exchange pacing.
//!
//! Built on [`Instant`], so expiry checks are monotonic and wrap-safe
//! without the signed-difference trick a raw millisecond tick would need.

use std::time::{Duration, Instant};

/// One-shot countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    deadline: Instant,
}

impl Timer {
    /// Start a timer expiring `ms` milliseconds from now.
    pub fn start(ms: u32) -> Self {
        Self {
            deadline: Instant::now() + Duration::from_millis(u64::from(ms)),
        }
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Block the calling thread for `ms` milliseconds. The orchestration loop
/// never calls this; it paces itself with [`Timer`] instead.
pub fn delay(ms: u32) {
    std::thread::sleep(Duration::from_millis(u64::from(ms)));
}
