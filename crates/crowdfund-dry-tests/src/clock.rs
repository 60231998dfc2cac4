// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Manual clock for deterministic time in async tests.

use crowdfund_app_core::clock_port::Clock;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Clock whose time only moves when a test says so or when a flow sleeps.
///
/// Clones share the same time source.
#[derive(Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
    sleeps: Rc<Cell<usize>>,
}

impl ManualClock {
    /// Clock starting at `unix_secs`.
    pub fn at_unix_secs(unix_secs: u64) -> Self {
        let clock = Self::default();
        clock.now_ms.set(unix_secs * 1_000);
        clock
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now_ms.set(self.now_ms.get().saturating_add(by));
    }

    /// Number of `sleep` calls so far.
    pub fn sleep_count(&self) -> usize {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_ms.get()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(duration);
    }
}
