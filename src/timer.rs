//! Daily timer window evaluation.
//!
//! A [`TimerWindow`] is a recurring daily interval given as start/end
//! hour:minute.  Both bounds are inclusive, and a window whose start lies
//! after its end wraps past midnight:
//!
//! ```text
//!  00:00                                              23:59
//!    |------[=========== 10:30 .. 17:30 ===========]-----|   s <= e
//!    |=====]                                 [===========|   s >  e  (22:00 .. 02:00)
//! ```
//!
//! Bounds are not range-checked here.  Out-of-range hours or minutes
//! still map to a deterministic minute count; validation belongs to the
//! property boundary in [`crate::app::service`].

use serde::{Deserialize, Serialize};

/// Wall-clock hour and minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight (`hour * 60 + minute`).
    pub const fn minutes(self) -> u32 {
        to_minutes(self.hour, self.minute)
    }
}

/// Daily pump window, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerWindow {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl Default for TimerWindow {
    fn default() -> Self {
        Self {
            start_hour: 10,
            start_minute: 30,
            end_hour: 17,
            end_minute: 30,
        }
    }
}

impl TimerWindow {
    pub const fn new(start_hour: u8, start_minute: u8, end_hour: u8, end_minute: u8) -> Self {
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    pub const fn start(&self) -> TimeOfDay {
        TimeOfDay::new(self.start_hour, self.start_minute)
    }

    pub const fn end(&self) -> TimeOfDay {
        TimeOfDay::new(self.end_hour, self.end_minute)
    }

    /// True if the window crosses midnight.
    pub const fn wraps_midnight(&self) -> bool {
        self.start().minutes() > self.end().minutes()
    }

    /// Whether `now` falls inside the window.
    pub fn contains(&self, now: TimeOfDay) -> bool {
        is_active(now.hour, now.minute, self)
    }
}

const fn to_minutes(hour: u8, minute: u8) -> u32 {
    hour as u32 * 60 + minute as u32
}

/// Evaluate the window at `hour:minute`.
///
/// A window with `start == end` is active for exactly that one minute.
pub fn is_active(hour: u8, minute: u8, window: &TimerWindow) -> bool {
    let now = to_minutes(hour, minute);
    let start = window.start().minutes();
    let end = window.end().minutes();

    if start <= end {
        start <= now && now <= end
    } else {
        now >= start || now <= end
    }
}
