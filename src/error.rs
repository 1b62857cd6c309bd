//! Error types for the pool controller.
//!
//! All variants are `Copy` so they can be handed to the event sink and
//! logged without allocation.  Nothing here is fatal: the worst outcome of
//! bad input is a rejected update with the controller state untouched.

use core::fmt;

// ---------------------------------------------------------------------------
// Property errors
// ---------------------------------------------------------------------------

/// Why a property-set request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyError {
    /// The property name is not one the controller understands.
    UnknownProperty,
    /// The `mode` value is not one of `auto`, `manual`, `timer`, `boost`.
    UnknownMode,
    /// The value could not be parsed as the property's numeric type.
    InvalidNumber,
    /// The value parsed but lies outside the accepted range.
    OutOfRange(&'static str),
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty => write!(f, "unknown property"),
            Self::UnknownMode => write!(f, "unknown mode"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::OutOfRange(why) => write!(f, "out of range: {why}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Routing errors
// ---------------------------------------------------------------------------

/// Why an inbound control message could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Topic does not have the `<root>/<device>/<node>/<property>/set` shape.
    MalformedTopic,
    /// A topic segment or payload exceeds its fixed buffer.
    FieldTooLong,
    /// No node with that id.
    UnknownNode,
    /// The node exists but does not accept that property.
    UnknownProperty,
    /// `switch` payload is not one of `true/on/1/false/off/0`.
    InvalidSwitchValue,
    /// The controller rejected the property update.
    Property(PropertyError),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTopic => write!(f, "malformed topic"),
            Self::FieldTooLong => write!(f, "field too long"),
            Self::UnknownNode => write!(f, "unknown node"),
            Self::UnknownProperty => write!(f, "unknown property"),
            Self::InvalidSwitchValue => write!(f, "invalid switch value"),
            Self::Property(e) => write!(f, "property: {e}"),
        }
    }
}

impl From<PropertyError> for RouteError {
    fn from(e: PropertyError) -> Self {
        Self::Property(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device answered on the bus.
    NoDevice,
    /// The conversion or scratchpad read failed.
    BusReadFailed,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => write!(f, "no device on bus"),
            Self::BusReadFailed => write!(f, "bus read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}
