use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Unscaled time source for reveal ticks and auto-advance delays.
///
/// Readings are offsets from an arbitrary origin and never go backwards.
/// Host pause or time scaling must not leak into an implementation, so a
/// frozen game keeps its dialogue responsive.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct RealtimeClock {
    origin: Instant,
}

impl RealtimeClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for RealtimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RealtimeClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock moved by hand. Clones share the same reading, so a test
/// keeps one handle and gives another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: f32) {
        self.advance(Duration::from_secs_f32(secs));
    }

    /// Moves to `at`; earlier instants are ignored.
    pub fn set(&self, at: Duration) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
