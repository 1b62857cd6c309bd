//! Actuator drivers.

pub mod relay;

pub use relay::RelayPump;
