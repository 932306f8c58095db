//! Request throttle for polite redirect resolution.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Caps in-flight requests and spaces out request starts.
pub struct Throttle {
    semaphore: Arc<Semaphore>,
    min_delay: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl Throttle {
    /// - `max_in_flight`: maximum number of concurrent requests (at least 1)
    /// - `min_delay`: minimum time between two request starts
    pub fn new(max_in_flight: usize, min_delay: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight.max(1))),
            min_delay,
            last_start: Mutex::new(None),
        }
    }

    /// No delay, effectively unbounded concurrency.
    pub fn unlimited() -> Self {
        Self::new(Semaphore::MAX_PERMITS, Duration::ZERO)
    }

    /// Wait until a request may start. The permit is held until dropped.
    pub async fn acquire(&self) -> ThrottlePermit {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("throttle semaphore is never closed");

        {
            let mut last = self.last_start.lock().await;
            if let Some(previous) = *last {
                let elapsed = previous.elapsed();
                if elapsed < self.min_delay {
                    tokio::time::sleep(self.min_delay - elapsed).await;
                }
            }
            *last = Some(Instant::now());
        }

        ThrottlePermit { _permit: permit }
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Releases its throttle slot when dropped.
pub struct ThrottlePermit {
    _permit: OwnedSemaphorePermit,
}
