use std::{
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

/// Cooperative stop signal shared between the caller and the workers.
///
/// Workers only look at it between blocks, so cancelling never leaves a
/// block half written.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (flag, wakeup) = &*self.inner;
        *flag.lock().unwrap_or_else(|err| err.into_inner()) = true;
        wakeup.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        let (flag, _) = &*self.inner;
        *flag.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Sleeps for `delay` unless cancelled first.
    pub fn pause(&self, delay: Duration) -> Result<(), Cancelled> {
        let (flag, wakeup) = &*self.inner;
        let deadline = Instant::now() + delay;
        let mut cancelled = flag.lock().unwrap_or_else(|err| err.into_inner());

        loop {
            if *cancelled {
                return Err(Cancelled);
            }

            let now = Instant::now();

            if now >= deadline {
                return Ok(());
            }

            cancelled = wakeup
                .wait_timeout(cancelled, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|err| err.into_inner().0);
        }
    }
}
