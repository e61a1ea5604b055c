//! Clock and thread-identity sources
//!
//! The pipeline asks these for the wall-clock time, the time elapsed since it
//! was created, and the calling thread's name. Tests substitute fixed values.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Source of wall-clock and elapsed time
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> DateTime<Local>;

    /// Time since the baseline captured when the clock was created
    fn elapsed(&self) -> Duration;
}

/// Clock backed by the system time and a monotonic baseline
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Capture the baseline now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Source of the calling thread's human-readable name
pub trait ThreadNames: Send + Sync {
    fn current(&self) -> String;
}

/// Uses the name given to the thread at spawn, or its id when it has none
#[derive(Debug, Clone, Copy, Default)]
pub struct StdThreadNames;

impl ThreadNames for StdThreadNames {
    fn current(&self) -> String {
        let thread = std::thread::current();
        match thread.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", thread.id()),
        }
    }
}
