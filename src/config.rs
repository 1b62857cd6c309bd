//! System configuration parameters
//!
//! All tunable parameters for the pool controller.  Values are loaded
//! through a [`ConfigPort`](crate::app::ports::ConfigPort) at startup and
//! may be changed at runtime through the property-set surface.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::timer::TimerWindow;

/// Temperature thresholds shared by the Auto and Boost strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Pool temperature (°C) above which solar heating stops.
    pub pool_max_temp_c: f32,
    /// Collector temperature (°C) required before solar heating starts.
    pub solar_min_temp_c: f32,
    /// Width (K) of the band between on- and off-thresholds.
    pub hysteresis_k: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pool_max_temp_c: 28.5,
            solar_min_temp_c: 55.0,
            hysteresis_k: 1.0,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Device id, used as the second topic segment.
    pub device_id: String,

    // --- Control ---
    /// Minimum time between two control ticks (seconds).
    pub measurement_interval_secs: u32,
    /// Mode selected at startup.
    pub mode: Mode,
    pub thresholds: Thresholds,
    pub timer: TimerWindow,

    // --- Sensors ---
    /// Consecutive failed reads tolerated before a probe reports "absent".
    pub sensor_max_missed_reads: u8,

    // --- Persistence ---
    /// Quiet period after the last property change before auto-save.
    pub autosave_delay_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            device_id: String::from("pool-controller"),
            measurement_interval_secs: 30,
            mode: Mode::Auto,
            thresholds: Thresholds::default(),
            timer: TimerWindow::default(),
            sensor_max_missed_reads: 3,
            autosave_delay_secs: 5,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  The string names the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.device_id.is_empty() {
            return Err("device_id must not be empty");
        }
        if self.measurement_interval_secs == 0 {
            return Err("measurement_interval_secs must be > 0");
        }
        let t = &self.thresholds;
        if !t.pool_max_temp_c.is_finite() {
            return Err("pool_max_temp_c must be finite");
        }
        if !t.solar_min_temp_c.is_finite() {
            return Err("solar_min_temp_c must be finite");
        }
        if !t.hysteresis_k.is_finite() || t.hysteresis_k < 0.0 {
            return Err("hysteresis_k must be finite and >= 0");
        }
        validate_window(&self.timer)
    }
}

/// Hours 0–23 and minutes 0–59.
pub fn validate_window(w: &TimerWindow) -> Result<(), &'static str> {
    if w.start_hour > 23 || w.end_hour > 23 {
        return Err("timer hours must be 0-23");
    }
    if w.start_minute > 59 || w.end_minute > 59 {
        return Err("timer minutes must be 0-59");
    }
    Ok(())
}
