//! Progress reporting for the archive fetch.
//!
//! The fetch reports `(downloaded_bytes, total_bytes)` through a callback;
//! `total_bytes` is 0 when the server sends no `Content-Length`. Calls are
//! rate-limited so terminal renderers are not flooded.

use std::time::{Duration, Instant};

/// Thread-safe progress callback receiving (`downloaded_bytes`, `total_bytes`).
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Rate-limiter for progress updates.
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    /// Create a new throttle with the specified minimum interval.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Create a throttle with a default interval of 100ms.
    pub const fn default_interval() -> Self {
        Self::new(Duration::from_millis(100))
    }

    /// Check if enough time has passed to emit another progress update.
    pub fn should_emit(&mut self) -> bool {
        let now = Instant::now();
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::default_interval()
    }
}

/// A callback paired with a throttle; the final update always goes through.
pub(crate) struct ThrottledProgress<'a> {
    callback: Option<&'a ProgressCallback>,
    throttle: ProgressThrottle,
}

impl<'a> ThrottledProgress<'a> {
    pub(crate) fn new(callback: Option<&'a ProgressCallback>) -> Self {
        Self {
            callback,
            throttle: ProgressThrottle::default(),
        }
    }

    pub(crate) fn update(&mut self, downloaded: u64, total: u64) {
        if let Some(cb) = self.callback {
            if self.throttle.should_emit() {
                cb(downloaded, total);
            }
        }
    }

    pub(crate) fn finish(&self, downloaded: u64, total: u64) {
        if let Some(cb) = self.callback {
            cb(downloaded, total);
        }
    }
}
