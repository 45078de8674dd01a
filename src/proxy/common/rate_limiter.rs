// Rate Limiter
// Fixed window call counter, one per process

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Time source for the rate window, in milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Monotonic clock, milliseconds since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { count: u32 },
    Denied { count: u32 },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    start: i64,
}

pub struct RateLimiter {
    max_requests: u32,
    window_ms: i64,
    clock: Arc<dyn Clock>,
    // None until the first call of the process
    window: Mutex<Option<Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_requests,
            window_ms: i64::try_from(window_ms).unwrap_or(i64::MAX),
            clock,
            window: Mutex::new(None),
        }
    }

    pub fn with_system_clock(max_requests: u32, window_ms: u64) -> Self {
        Self::new(max_requests, window_ms, Arc::new(SystemClock::new()))
    }

    /// Count one call against the current window.
    ///
    /// The window resets only once strictly more than `window_ms` has elapsed
    /// since it opened. Denied calls still count, so a flood keeps the window
    /// saturated until it expires.
    pub async fn acquire(&self) -> Decision {
        let now = self.clock.now_millis();
        let mut guard = self.window.lock().await;
        let window = guard.get_or_insert(Window { count: 0, start: now });

        if now - window.start > self.window_ms {
            window.count = 0;
            window.start = now;
        }

        window.count = window.count.saturating_add(1);

        if window.count > self.max_requests {
            Decision::Denied {
                count: window.count,
            }
        } else {
            Decision::Allowed {
                count: window.count,
            }
        }
    }
}
