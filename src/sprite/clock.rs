use std::time::{Duration, Instant};

/// Keeps track of the time passed between frames (delta time) and since creation (elapsed time).
/// Call [`Clock::update`] once per frame.
#[derive(Clone, Debug)]
pub struct Clock {
    previous: Instant,
    delta: Duration,
    elapsed: Duration,
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            previous: start,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.previous);
        self.elapsed += self.delta;
        self.previous = now;
    }

    /// seconds since the previous update
    pub fn delta_time(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// seconds since the clock was created
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
