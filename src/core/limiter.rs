//! Outbound rate limiting

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Interval rate limiter shared by every query a client issues.
///
/// Holds the next allowed send instant behind an async mutex; `acquire`
/// sleeps until that slot opens and reserves the one after it. Because
/// callers queue on the mutex, concurrent aggregations in the same process
/// are serialized to at most `max_rps` calls per second on average.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_rps` calls per second.
    ///
    /// A non-positive rate disables limiting; the client validates its
    /// config before getting here.
    pub fn new(max_rps: f64) -> Self {
        let min_interval = if max_rps > 0.0 {
            Duration::from_secs_f64(1.0 / max_rps)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Block until a send slot is available, then claim it
    pub async fn acquire(&self) {
        let mut next_slot = self.next_slot.lock().await;
        let now = Instant::now();
        if *next_slot > now {
            debug!(wait_ms = (*next_slot - now).as_millis() as u64, "rate limit wait");
            sleep_until(*next_slot).await;
        }
        *next_slot = Instant::now() + self.min_interval;
    }
}
