//! Dial clock widget controller.
//!
//! Owns the periodic tick that keeps the dial's reading current. Dropping the
//! controller is widget teardown: the tick is unregistered with it.

use crate::face::{BezelSegment, DialLayout, elapsed_segment};
use crate::ticker::{Scheduler, TickHandle};
use crate::time::{TimeOfDay, TimeSource};
use std::cell::Cell;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Time-derived values shown by the clock widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    pub time: TimeOfDay,
    /// Dial angle of the current minute.
    pub angle: f64,
    /// Fraction of the 12-hour cycle elapsed (top-bar needle).
    pub progress: f64,
}

impl ClockReading {
    pub fn at(time: TimeOfDay) -> Self {
        Self {
            time,
            angle: time.dial_angle(),
            progress: time.progress_12h(),
        }
    }
}

/// A mounted dial clock.
pub struct DialClock {
    layout: DialLayout,
    reading: Rc<Cell<ClockReading>>,
    tick: TickHandle,
}

impl DialClock {
    /// Read the time once, then re-read it every `interval`.
    pub fn mount<T>(
        scheduler: &Scheduler,
        source: Rc<T>,
        layout: DialLayout,
        interval: Duration,
        now: Instant,
    ) -> Self
    where
        T: TimeSource + 'static,
    {
        let reading = Rc::new(Cell::new(ClockReading::at(source.now())));
        let shared = Rc::clone(&reading);
        let tick = scheduler.every(interval, now, move |_| {
            shared.set(ClockReading::at(source.now()));
        });
        Self {
            layout,
            reading,
            tick,
        }
    }

    pub fn reading(&self) -> ClockReading {
        self.reading.get()
    }

    pub fn layout(&self) -> &DialLayout {
        &self.layout
    }

    /// Bezel segment from 12 o'clock to the latest reading.
    pub fn elapsed_segment(&self) -> BezelSegment {
        elapsed_segment(&self.reading().time)
    }

    /// Whether the periodic tick is still registered.
    pub fn is_ticking(&self) -> bool {
        self.tick.is_active()
    }
}
