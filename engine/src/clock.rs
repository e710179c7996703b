/// Data-seconds advanced per wall-second at speed multiplier 1.
pub const BASE_RATE: f64 = 60.0;

/// The playback timestamp driving every frame, in epoch seconds. Bounds come from the
/// loaded feed and don't change until a new feed loads. Only ever advanced from the
/// frame scheduler; there's no concurrent mutation.
pub struct PlaybackClock {
    current: f64,
    min: f64,
    max: f64,
    paused: bool,
    speed: f64,
}

impl PlaybackClock {
    /// Starts paused at the beginning of the window.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            current: min,
            min,
            max,
            paused: true,
            speed: 1.0,
        }
    }

    /// Advances by scaled wall-clock time. No-op while paused. Overrunning the end of
    /// the window loops back to the exact start; the residual overflow is dropped.
    pub fn tick(&mut self, elapsed_wall_seconds: f64) {
        if self.paused {
            return;
        }
        self.current += elapsed_wall_seconds * BASE_RATE * self.speed;
        if self.current > self.max {
            self.current = self.min;
        }
    }

    pub fn toggle_play(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.speed = multiplier;
        } else {
            warn!("Ignoring speed multiplier {multiplier}");
        }
    }

    /// Manual scrub. Works in either play state and clamps into the window.
    pub fn set_time(&mut self, t: f64) {
        self.current = t.clamp(self.min, self.max);
    }

    pub fn current_time(&self) -> f64 {
        self.current
    }

    pub fn min_time(&self) -> f64 {
        self.min
    }

    pub fn max_time(&self) -> f64 {
        self.max
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
