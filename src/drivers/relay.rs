//! Pump relay driver.
//!
//! Drives one relay channel through an `embedded-hal` output pin.  The
//! relay boards used for pool pumps are active-low: pin low = coil
//! energised = pump on.
//!
//! ## Safety contract
//!
//! The solar pump must never run while the pool pump is off.  That is
//! enforced by the control rules; this driver is a dumb actuator.

use embedded_hal::digital::OutputPin;
use log::{debug, error};

use crate::app::ports::PumpActuator;
use crate::error::ActuatorError;

pub struct RelayPump<P: OutputPin> {
    name: &'static str,
    pin: P,
    on: bool,
}

impl<P: OutputPin> RelayPump<P> {
    /// Take the pin and drive it to the "off" level.
    pub fn new(name: &'static str, pin: P) -> Self {
        let mut relay = Self {
            name,
            pin,
            on: false,
        };
        if let Err(e) = relay.drive(false) {
            error!("{} relay init failed: {}", name, e);
        }
        relay
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn drive(&mut self, on: bool) -> Result<(), ActuatorError> {
        let level = if on {
            self.pin.set_low()
        } else {
            self.pin.set_high()
        };
        level.map_err(|_| ActuatorError::GpioWriteFailed)
    }
}

impl<P: OutputPin> PumpActuator for RelayPump<P> {
    fn state(&self) -> bool {
        self.on
    }

    /// Drives the pin on every call, so a repeated command re-asserts
    /// the relay level.
    fn set_state(&mut self, on: bool) {
        if let Err(e) = self.drive(on) {
            error!("{} relay write failed: {}", self.name, e);
        }
        if self.on != on {
            debug!("{} relay {}", self.name, if on { "energised" } else { "released" });
        }
        self.on = on;
    }
}
