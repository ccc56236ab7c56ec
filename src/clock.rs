use std::cell::Cell;
use std::time::{Duration, Instant};

/// Supplies monotonic time as an offset from the source's own origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Production time source backed by `Instant`
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

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven time source for tests.
///
/// Every call to `now` returns the current reading and then advances it by
/// `step`, so a loop that samples time once per frame sees time move forward
/// deterministically.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stepping(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Start timestamp of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    start: Duration,
}

impl SessionClock {
    pub fn started_at(start: Duration) -> Self {
        Self { start }
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start)
    }
}
