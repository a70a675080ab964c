//! Periodic callbacks driven by the host's event loop.
//!
//! Nothing here spawns threads or timers of its own. The host calls
//! [`Scheduler::run_due`] from its frame or timer callback, and every
//! registration lives exactly as long as its [`TickHandle`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default interval between clock ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

type Callback = Box<dyn FnMut(Instant)>;

struct Timer {
    interval: Duration,
    next_due: Instant,
    /// Taken out while the callback runs.
    callback: Option<Callback>,
}

#[derive(Default)]
struct SchedulerInner {
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
}

/// Single-threaded registry of repeating callbacks.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` every `interval`, first at `start + interval`.
    ///
    /// The registration is removed when the returned handle is dropped.
    #[must_use = "dropping the handle cancels the callback"]
    pub fn every<F>(&self, interval: Duration, start: Instant, callback: F) -> TickHandle
    where
        F: FnMut(Instant) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.timers.insert(
            id,
            Timer {
                interval,
                next_due: start + interval,
                callback: Some(Box::new(callback)),
            },
        );
        TickHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Fire every registration whose deadline has passed, once each.
    ///
    /// Missed ticks are not replayed; the next deadline is `now + interval`.
    /// Returns the number of callbacks run.
    pub fn run_due(&self, now: Instant) -> usize {
        let due: Vec<u64> = self
            .inner
            .borrow()
            .timers
            .iter()
            .filter(|(_, t)| t.next_due <= now)
            .map(|(id, _)| *id)
            .collect();

        let mut fired = 0;
        for id in due {
            // Release the borrow before running user code, so callbacks can
            // register or cancel timers.
            let callback = {
                let mut inner = self.inner.borrow_mut();
                match inner.timers.get_mut(&id) {
                    Some(timer) => {
                        timer.next_due = now + timer.interval;
                        timer.callback.take()
                    }
                    None => None,
                }
            };
            let Some(mut callback) = callback else {
                continue;
            };
            callback(now);
            fired += 1;

            if let Some(timer) = self.inner.borrow_mut().timers.get_mut(&id) {
                timer.callback = Some(callback);
            }
        }
        fired
    }

    /// Earliest pending deadline, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.borrow().timers.values().map(|t| t.next_due).min()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned registration of a repeating callback.
///
/// Dropping the handle (or calling [`TickHandle::cancel`]) unregisters it.
pub struct TickHandle {
    id: u64,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl TickHandle {
    /// Stop the callback now.
    pub fn cancel(self) {
        // Drop does the work.
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.scheduler
            .upgrade()
            .is_some_and(|inner| {
                let inner = inner.borrow();
                inner.timers.contains_key(&self.id)
            })
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.scheduler.upgrade() {
            // The callback is dropped after the borrow ends, in case it
            // owns handles of its own.
            let removed = match inner.try_borrow_mut() {
                Ok(mut inner) => inner.timers.remove(&self.id),
                Err(_) => {
                    log::warn!("Tick {} dropped while scheduler busy", self.id);
                    None
                }
            };
            drop(removed);
        }
    }
}
