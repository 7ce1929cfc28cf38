//! Time source and rate gates used to space out outbound requests.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<K: Clock + ?Sized> Clock for &K {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Fixed-interval gate: consecutive passes through `wait` are at least
/// `interval` apart. The first pass never blocks.
pub struct IntervalGate<K: Clock> {
    interval: Duration,
    clock: K,
    last: Cell<Option<Instant>>,
}

impl<K: Clock> IntervalGate<K> {
    pub fn new(interval: Duration, clock: K) -> Self {
        Self {
            interval,
            clock,
            last: Cell::new(None),
        }
    }

    /// Block until the gate opens, then mark the pass
    pub fn wait(&self) {
        if let Some(last) = self.last.get() {
            let elapsed = self.clock.now().saturating_duration_since(last);
            if elapsed < self.interval {
                self.clock.sleep(self.interval - elapsed);
            }
        }
        self.last.set(Some(self.clock.now()));
    }
}
