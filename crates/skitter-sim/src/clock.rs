use std::time::{Duration, Instant};

/// Monotonic frame clock for the simulation step.
///
/// The clock starts (and resets to) an unarmed state: the first `tick()` only
/// records the baseline timestamp and yields no delta, so the step following
/// a reconfigure never integrates a stale interval.
///
/// Delta time is clamped from above to keep the simulation stable when the
/// host stalls (debugger, backgrounded surface).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates an unarmed clock with the default clamp.
    pub fn new() -> Self {
        Self {
            last: None,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Creates an unarmed clock with a custom upper clamp.
    pub fn with_max_delta(dt_max: Duration) -> Self {
        Self { last: None, dt_max }
    }

    /// Returns the clock to the unarmed state.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// True once a baseline timestamp has been recorded.
    pub fn is_armed(&self) -> bool {
        self.last.is_some()
    }

    /// Advances the clock.
    ///
    /// Yields `None` on the first tick after construction or `reset()`,
    /// then the clamped elapsed seconds on every later tick.
    pub fn tick(&mut self) -> Option<f32> {
        let now = Instant::now();
        let dt = self.last.map(|last| {
            now.saturating_duration_since(last)
                .min(self.dt_max)
                .as_secs_f32()
        });
        self.last = Some(now);
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
