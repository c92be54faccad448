//! Scheduler layer for the action
//!
//! Owns the polling loop that follows a triggered build until Buildkite
//! reports it finished, and the clock that loop sleeps on.

pub mod clock;
pub mod waiter;

pub use clock::{Clock, TokioClock};
pub use waiter::BuildWaiter;
