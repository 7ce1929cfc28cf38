use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::pacing::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Fixed-rate driver: runs a job immediately, then once per interval.
///
/// The job runs on the calling thread, so a tick can never start while the
/// previous one is still running. Ticks missed because a run overran the
/// interval are dropped rather than replayed.
pub struct Scheduler<K: Clock> {
    interval: Duration,
    clock: K,
    state: Cell<SchedulerState>,
}

impl<K: Clock> Scheduler<K> {
    pub fn new(interval: Duration, clock: K) -> Self {
        Self {
            interval,
            clock,
            state: Cell::new(SchedulerState::Idle),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state.get()
    }

    /// Run `job` on every tick. Returns after `max_ticks` runs, or never
    /// when no limit is given. The job receives the 1-based tick number.
    pub fn run<F>(&self, max_ticks: Option<u64>, mut job: F) -> u64
    where
        F: FnMut(u64),
    {
        let mut tick = 0;

        loop {
            tick += 1;
            let started = self.clock.now();

            self.state.set(SchedulerState::Running);
            tracing::info!(tick, "Starting scheduled run");
            job(tick);
            self.state.set(SchedulerState::Idle);

            if max_ticks.is_some_and(|max| tick >= max) {
                return tick;
            }

            let now = self.clock.now();
            let wait = match next_deadline(started, now, self.interval) {
                Some((deadline, skipped)) => {
                    if skipped > 0 {
                        tracing::warn!(
                            tick,
                            skipped,
                            "Run overran the interval; skipping missed ticks"
                        );
                    }
                    deadline.saturating_duration_since(now)
                }
                None => {
                    tracing::warn!(
                        tick,
                        "Next run is out of the clock's range; waiting one full interval"
                    );
                    self.interval
                }
            };

            tracing::info!(next_run_in_secs = wait.as_secs(), "Waiting for next run");
            self.clock.sleep(wait);
        }
    }
}

/// Next tick on the fixed-rate grid anchored at `started` that lies in the
/// future, plus how many grid points were already in the past. `None` when
/// that point cannot be represented as an `Instant`.
fn next_deadline(started: Instant, now: Instant, interval: Duration) -> Option<(Instant, u32)> {
    if interval.is_zero() {
        return Some((now, 0));
    }

    let elapsed = now.saturating_duration_since(started);
    if elapsed < interval {
        return started.checked_add(interval).map(|deadline| (deadline, 0));
    }

    let missed = u32::try_from(elapsed.as_nanos() / interval.as_nanos()).ok()?;
    let offset = interval.checked_mul(missed.checked_add(1)?)?;
    started.checked_add(offset).map(|deadline| (deadline, missed))
}
