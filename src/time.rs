//! Frame clock: turns wall-clock readings into per-frame elapsed seconds.
//!
//! `draw_web()` calls at ~60fps with variable delta. Unlike a fixed-step
//! accumulator the full delta is passed through, however large, so a
//! backgrounded tab resumes with one big step.

/// A monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `performance.now()` in the browser. Reads 0 outside a window.
#[derive(Debug, Default)]
pub struct PerformanceClock;

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or(0.0, |p| p.now())
    }
}

/// Hand-driven clock for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::cell::Cell<f64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Tracks the previous frame's timestamp.
#[derive(Debug, Default)]
pub struct FrameClock {
    /// Timestamp of the last update (ms), None before the first frame.
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `now_ms`, discarding any pending delta.
    pub fn restart(&mut self, now_ms: f64) {
        self.last_timestamp = Some(now_ms);
    }

    /// Feed the current timestamp. Returns seconds elapsed since the last
    /// call: 0 on the first frame, never negative.
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_timestamp {
            Some(prev) => ((now_ms - prev) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        delta
    }
}
