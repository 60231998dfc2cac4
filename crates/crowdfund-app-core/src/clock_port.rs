// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wall-clock and timer port.
//!
//! The browser adapter reads `Date.now()` and sleeps on `setTimeout`; tests use
//! a manual clock that advances when slept on.

use std::time::Duration;

/// Seconds in one day, the unit of "days remaining".
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Time source and sleeper for the single-threaded client.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Suspend the calling flow (not the whole UI) for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Whole seconds since the Unix epoch.
    fn now_unix_secs(&self) -> u64 {
        self.now_millis() / 1_000
    }
}
