//! One-wire temperature probe (DS18B20 class).
//!
//! [`TemperatureProbe`] wraps a [`OneWireDriver`] and turns its raw
//! conversions into the controller's `Option<f32>` contract: readings are
//! rounded to 0.01 °C, out-of-range values are discarded, and a few missed
//! conversions in a row are bridged with the last good value before the
//! probe reports "unavailable".

use log::warn;

use crate::app::ports::TemperatureSensor;
use crate::error::SensorError;

/// Lowest temperature the probe can report (°C).
pub const MIN_VALID_C: f32 = -55.0;
/// Highest temperature the probe can report (°C).
pub const MAX_VALID_C: f32 = 125.0;

/// A single device on a one-wire bus.
pub trait OneWireDriver {
    /// Trigger a conversion and read the result in °C.
    fn convert_and_read(&mut self) -> Result<f32, SensorError>;
}

pub struct TemperatureProbe<D: OneWireDriver> {
    name: &'static str,
    driver: D,
    last_good: Option<f32>,
    missed: u8,
    max_missed: u8,
}

impl<D: OneWireDriver> TemperatureProbe<D> {
    /// `max_missed` consecutive failed reads are bridged with the last good
    /// value; the next failure reports `None`.
    pub fn new(name: &'static str, driver: D, max_missed: u8) -> Self {
        Self {
            name,
            driver,
            last_good: None,
            missed: 0,
            max_missed,
        }
    }

    /// Consecutive failed reads since the last good one.
    pub fn missed_reads(&self) -> u8 {
        self.missed
    }

    fn sample(&mut self) -> Result<f32, SensorError> {
        let raw = self.driver.convert_and_read()?;
        if !raw.is_finite() || !(MIN_VALID_C..=MAX_VALID_C).contains(&raw) {
            return Err(SensorError::OutOfRange);
        }
        Ok((raw * 100.0).round() / 100.0)
    }
}

impl<D: OneWireDriver> TemperatureSensor for TemperatureProbe<D> {
    fn read(&mut self) -> Option<f32> {
        match self.sample() {
            Ok(celsius) => {
                self.missed = 0;
                self.last_good = Some(celsius);
                Some(celsius)
            }
            Err(e) => {
                self.missed = self.missed.saturating_add(1);
                warn!("{} probe read failed ({}), {} in a row", self.name, e, self.missed);
                if self.missed > self.max_missed {
                    self.last_good = None;
                }
                self.last_good
            }
        }
    }
}
