//! Outbound controller events.
//!
//! The [`ModeController`](super::service::ModeController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them, e.g. log them to the
//! console or record them in a test.

use crate::control::SwitchReason;
use crate::error::{PropertyError, RouteError};
use crate::mode::Mode;

use super::commands::Property;
use super::ports::{Probe, PumpId};
use super::service::StatusSnapshot;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// The controller has started (carries the initial mode).
    Started(Mode),

    /// Operator changed the mode; takes effect on the next tick.
    ModeChanged { from: Mode, to: Mode },

    /// A property update was applied.
    PropertyChanged { property: Property },

    /// A property update was rejected; state is unchanged.
    PropertyRejected {
        property: Option<Property>,
        error: PropertyError,
    },

    /// An inbound message could not be routed.
    MessageRejected(RouteError),

    /// A pump actually changed state.
    PumpSwitched {
        pump: PumpId,
        on: bool,
        reason: SwitchReason,
    },

    /// A probe had no reading during a tick.
    SensorUnavailable(Probe),

    /// Summary of a completed control tick.
    Cycle(CycleReport),

    /// Configuration snapshot for publication.
    Status(StatusSnapshot),
}

/// What one tick saw and left behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub mode: Mode,
    pub pool_temp: Option<f32>,
    pub solar_temp: Option<f32>,
    pub pool_pump_on: bool,
    pub solar_pump_on: bool,
}
