//! Sensor drivers.
//!
//! Each driver implements [`TemperatureSensor`](crate::app::ports::TemperatureSensor)
//! so the controller never sees bus-level failures, only present or
//! absent readings.

pub mod temperature;

pub use temperature::{OneWireDriver, TemperatureProbe};
