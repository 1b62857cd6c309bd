//! System clock adapter.
//!
//! Provides monotonic uptime from `std::time::Instant` and local
//! wall-clock time from `chrono`, packaged as a [`Timestamp`].

use std::time::Instant;

use chrono::{Local, Timelike};

use crate::app::ports::{ClockPort, Timestamp};
use crate::timer::TimeOfDay;

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since construction (monotonic).
    pub fn uptime_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Current local hour and minute.
    pub fn time_of_day(&self) -> TimeOfDay {
        let now = Local::now();
        // chrono guarantees hour < 24 and minute < 60.
        TimeOfDay::new(now.hour() as u8, now.minute() as u8)
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.uptime_ms(), self.time_of_day())
    }
}
