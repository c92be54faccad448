//! Build waiter
//!
//! Polls a triggered build until Buildkite stamps it with `finished_at`.
//! There is no timeout: the loop ends when the build does, or
//! when the workflow runner kills the process.

use colored::*;
use kite_client::{BuildTransport, Result};
use kite_core::domain::build::Build;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::clock::Clock;

/// Delay before every poll
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Minimum quiet period before a "still waiting" notice is printed
pub const NOTICE_INTERVAL: Duration = Duration::from_secs(60);

/// Follows a build from trigger to completion
pub struct BuildWaiter<'a> {
    transport: &'a dyn BuildTransport,
    clock: &'a dyn Clock,
    poll_interval: Duration,
    notice_interval: Duration,
}

impl<'a> BuildWaiter<'a> {
    pub fn new(transport: &'a dyn BuildTransport, clock: &'a dyn Clock) -> Self {
        Self {
            transport,
            clock,
            poll_interval: POLL_INTERVAL,
            notice_interval: NOTICE_INTERVAL,
        }
    }

    /// Polls until the build is finished and returns the final record
    ///
    /// At least one poll is always made, even if the triggered record already
    /// looks finished. Any transport error ends the wait.
    pub async fn wait(&self, build: Build) -> Result<Build> {
        println!("{}", "⌛ Waiting for build to finish".dimmed());
        info!("Waiting for build #{} to finish", build.number);

        let url = build.url.clone();
        let mut notice = Notice::new(self.clock.now(), self.notice_interval);
        let mut current = build;
        let mut polls = 0u32;

        loop {
            self.clock.sleep(self.poll_interval).await;

            if notice.due(self.clock.now()) {
                println!("{}", "⌛ Still waiting for build to finish".dimmed());
            }

            current = self.transport.get_build(&url).await?;
            polls += 1;
            debug!(
                "Poll {}: build #{} is {}",
                polls, current.number, current.state
            );

            if current.is_finished() {
                break;
            }
        }

        info!(
            "Build #{} finished with state {} after {} poll(s)",
            current.number, current.state, polls
        );

        Ok(current)
    }
}

/// Tracks when the last progress notice went out
struct Notice {
    last: Instant,
    every: Duration,
}

impl Notice {
    fn new(start: Instant, every: Duration) -> Self {
        Self { last: start, every }
    }

    /// True once strictly more than `every` has passed since the last notice
    fn due(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last) > self.every {
            self.last = now;
            true
        } else {
            false
        }
    }
}
