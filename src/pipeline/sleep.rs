//! Interruptible waits
//!
//! Rust threads cannot be interrupted from outside, so a cancellable sleep
//! waits on an [`Interrupt`] handle instead. Any clone of the handle can wake
//! every waiter, which then returns [`Error::InterruptedWait`].

use crate::error::{Error, Result};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InterruptState {
    interrupted: Mutex<bool>,
    wake: Condvar,
}

/// Cloneable cancellation handle for [`Interrupt::sleep`]
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    state: Arc<InterruptState>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake every current and future waiter
    pub fn interrupt(&self) {
        let mut flag = self
            .state
            .interrupted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *flag = true;
        self.state.wake.notify_all();
    }

    /// Clear the interrupted flag so the handle can be reused
    pub fn reset(&self) {
        *self
            .state
            .interrupted
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = false;
    }

    pub fn is_interrupted(&self) -> bool {
        *self
            .state
            .interrupted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for `duration` unless interrupted first. A duration too long to
    /// fit an `Instant` waits until interrupted.
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        let deadline = Instant::now().checked_add(duration);
        let mut flag = self
            .state
            .interrupted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            if *flag {
                return Err(Error::InterruptedWait {
                    requested: duration,
                });
            }
            // Spurious wakeups loop back and re-check both conditions
            flag = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    self.state
                        .wake
                        .wait_timeout(flag, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self
                    .state
                    .wake
                    .wait(flag)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        }
    }
}

/// `2s`, `1.5s`, `0.25s`
pub(crate) fn format_seconds(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        return duration.as_secs().to_string();
    }
    let text = format!("{:.3}", duration.as_secs_f64());
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
