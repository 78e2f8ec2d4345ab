//! Cancellable waiting for an exhausted timestamp to pass
//!
//! Exact generation sleeps a fixed interval and re-samples the clock. The sleep
//! parks on a condition variable so that a [`CancellationToken`] wakes it early.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::time::ClockError;

/// Cloneable handle used to abort an exact generation while it waits
///
/// All clones share one flag; cancelling any of them cancels every wait
/// observing the token, now and later.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: Mutex<bool>,
    wakeup: Condvar,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel and wake every thread sleeping on this token
    pub fn cancel(&self) {
        let mut cancelled = self.inner.cancelled.lock();
        *cancelled = true;
        self.inner.wakeup.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.lock()
    }

    /// Sleep for `interval` or until cancelled, whichever comes first
    ///
    /// Returns `true` if the token is cancelled.
    pub fn sleep(&self, interval: Duration) -> bool {
        let deadline = Instant::now() + interval;
        let mut cancelled = self.inner.cancelled.lock();
        while !*cancelled {
            if self
                .inner
                .wakeup
                .wait_until(&mut cancelled, deadline)
                .timed_out()
            {
                break;
            }
        }
        *cancelled
    }
}

/// Sleep one retry interval, then read the clock again
///
/// Returns `Ok(None)` if the token was cancelled, in which case the clock is not read.
pub fn sleep_then_sample<F>(
    token: &CancellationToken,
    interval: Duration,
    get_time: F,
) -> Result<Option<u64>, ClockError>
where
    F: Fn() -> Result<u64, ClockError>,
{
    if token.sleep(interval) {
        return Ok(None);
    }
    get_time().map(Some)
}
