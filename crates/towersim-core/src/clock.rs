//! In-game clock and fixed-period rule timers.

use serde::{Deserialize, Serialize};

/// Day/hour provider driven by simulated seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    /// Hour of day, 0.0..24.0
    pub hour: f32,
    /// Simulated seconds per in-game hour
    pub seconds_per_hour: f32,
}

impl GameClock {
    pub fn new(start_hour: f32, seconds_per_hour: f32) -> Self {
        Self {
            day: 0,
            hour: start_hour.rem_euclid(24.0),
            seconds_per_hour: seconds_per_hour.max(f32::EPSILON),
        }
    }

    pub fn advance(&mut self, seconds: f32) {
        self.hour += seconds / self.seconds_per_hour;
        while self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day += 1;
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(8.0, 60.0)
    }
}

/// Accumulates elapsed time and fires once per period
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntervalTimer {
    pub period: f32,
    accumulated: f32,
}

impl IntervalTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulated: 0.0,
        }
    }

    /// Add `delta` seconds. Returns the time accumulated since the last firing
    /// when the period has been reached.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.accumulated += delta;
        if self.accumulated >= self.period {
            let elapsed = self.accumulated;
            self.accumulated = 0.0;
            Some(elapsed)
        } else {
            None
        }
    }
}
