use std::cell::Cell;
use std::time::Instant;

/// Source of the monotonically increasing animation time, in seconds.
pub trait Clock {
    fn elapsed(&self) -> f32;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
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
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Hand-driven clock for headless rendering and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f32>,
}

impl ManualClock {
    pub fn new(start: f32) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move time forward. Negative steps are ignored; time never runs back.
    pub fn advance(&self, dt: f32) {
        if dt > 0.0 {
            self.now.set(self.now.get() + dt);
        }
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now.get()
    }
}
