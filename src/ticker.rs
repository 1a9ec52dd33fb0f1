use chrono::{DateTime, Local};
use std::thread;
use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Get the default tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Fixed-cadence tick source. Deadlines are scheduled from the previous
/// deadline, so slow ticks do not accumulate drift.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next tick and return the wall-clock time it fired at
    pub fn wait(&mut self) -> DateTime<Local> {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        self.next += self.interval;
        // Skip ticks missed while the process was suspended
        let now = Instant::now();
        if self.next < now {
            self.next = now + self.interval;
        }
        Local::now()
    }
}
