//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control surface of the pool controller: the
//! [`ModeController`](service::ModeController), the message router and the
//! inbound channel.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod channels;
pub mod commands;
pub mod events;
pub mod ports;
pub mod router;
pub mod service;
