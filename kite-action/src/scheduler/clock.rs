//! Time source for the polling loop

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Source of time and delays
///
/// The waiter never touches the system clock directly, so tests can drive it
/// without real sleeps.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by tokio timers
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[tokio::test]
    async fn test_manual_clock_advances_on_sleep() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.sleep(Duration::from_secs(15)).await;
        clock.sleep(Duration::from_secs(15)).await;

        assert_eq!(clock.now() - start, Duration::from_secs(30));
        assert_eq!(clock.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_tokio_clock_sleeps() {
        let clock = TokioClock;
        let start = clock.now();
        clock.sleep(Duration::from_millis(5)).await;
        assert!(clock.now() - start >= Duration::from_millis(5));
    }
}
