//! Simulated peripherals for host runs.
//!
//! [`SimPin`] is an `embedded-hal` output pin that only remembers its
//! level.  [`SimOneWire`] is a one-wire probe whose temperature is
//! injected through a shared [`SimThermometer`] handle, so the stdin
//! reader can change it while the control loop owns the probe.

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::error::SensorError;
use crate::sensors::OneWireDriver;

/// Output pin that records its level.
#[derive(Debug, Default)]
pub struct SimPin {
    high: bool,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

/// Shared handle for injecting a probe temperature.
#[derive(Debug, Clone)]
pub struct SimThermometer {
    celsius_bits: Arc<AtomicU32>,
    connected: Arc<AtomicBool>,
}

impl SimThermometer {
    pub fn new(celsius: f32) -> Self {
        Self {
            celsius_bits: Arc::new(AtomicU32::new(celsius.to_bits())),
            connected: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set(&self, celsius: f32) {
        self.celsius_bits.store(celsius.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.celsius_bits.load(Ordering::Relaxed))
    }

    /// Simulate unplugging (`false`) or reconnecting the probe.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// A one-wire driver reading from this handle.
    pub fn driver(&self) -> SimOneWire {
        SimOneWire {
            source: self.clone(),
        }
    }
}

/// One-wire driver backed by a [`SimThermometer`].
#[derive(Debug)]
pub struct SimOneWire {
    source: SimThermometer,
}

impl OneWireDriver for SimOneWire {
    fn convert_and_read(&mut self) -> Result<f32, SensorError> {
        if !self.source.connected.load(Ordering::Relaxed) {
            return Err(SensorError::NoDevice);
        }
        Ok(self.source.get())
    }
}
