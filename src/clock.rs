use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u32 = 1440;

/// In-game calendar: a day counter plus minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    day: u32,
    minutes: u32,
}

impl Clock {
    pub fn new(day: u32, minutes: u32) -> Self {
        Self {
            day: day.max(1),
            minutes: minutes % MINUTES_PER_DAY,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Moves time forward. Reaching midnight resets the minutes to zero
    /// (any overshoot is dropped) and starts the next day. Returns true on
    /// rollover.
    pub fn advance(&mut self, step: u32) -> bool {
        self.minutes += step;
        if self.minutes >= MINUTES_PER_DAY {
            self.minutes = 0;
            self.day += 1;
            return true;
        }
        false
    }

    pub fn time_string(&self) -> String {
        NaiveTime::from_num_seconds_from_midnight_opt(self.minutes * 60, 0)
            .map(|time| time.format("%H:%M").to_string())
            .unwrap_or_else(|| format!("{:02}:{:02}", self.minutes / 60, self.minutes % 60))
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1, 480)
    }
}
