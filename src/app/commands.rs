//! Inbound control messages.
//!
//! A control message names a node, one of its properties, and a raw
//! string value, e.g. topic `homie/pool-controller/operation-mode/mode/set`
//! with payload `boost`.  The [`router`](super::router) decides whether it
//! goes to the controller or straight to a pump.

use core::fmt;
use core::str::FromStr;

use crate::error::{PropertyError, RouteError};

/// Node id of the operation-mode controller.
pub const CONTROLLER_NODE: &str = "operation-mode";

/// Property accepted by pump nodes.
pub const SWITCH_PROPERTY: &str = "switch";

/// Controller properties, in status publication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Mode,
    PoolMaxTemp,
    SolarMinTemp,
    Hysteresis,
    TimerStartHour,
    TimerStartMinutes,
    TimerEndHour,
    TimerEndMinutes,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::Mode,
        Property::PoolMaxTemp,
        Property::SolarMinTemp,
        Property::Hysteresis,
        Property::TimerStartHour,
        Property::TimerStartMinutes,
        Property::TimerEndHour,
        Property::TimerEndMinutes,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::PoolMaxTemp => "pool-max-temp",
            Self::SolarMinTemp => "solar-min-temp",
            Self::Hysteresis => "hysteresis",
            Self::TimerStartHour => "timer-start-hour",
            Self::TimerStartMinutes => "timer-start-minutes",
            Self::TimerEndHour => "timer-end-hour",
            Self::TimerEndMinutes => "timer-end-minutes",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(PropertyError::UnknownProperty)
    }
}

/// Parse a pump `switch` payload: `true/on/1` or `false/off/0`, any case.
pub fn parse_switch(value: &str) -> Result<bool, RouteError> {
    let v = value.trim();
    if ["true", "on", "1"].iter().any(|s| v.eq_ignore_ascii_case(s)) {
        Ok(true)
    } else if ["false", "off", "0"].iter().any(|s| v.eq_ignore_ascii_case(s)) {
        Ok(false)
    } else {
        Err(RouteError::InvalidSwitchValue)
    }
}

/// One inbound property-set message, copied into fixed buffers so it can
/// cross the [`channels`](super::channels) without heap allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMessage {
    pub node: heapless::String<24>,
    pub property: heapless::String<32>,
    pub value: heapless::String<32>,
}

impl PropertyMessage {
    pub fn new(node: &str, property: &str, value: &str) -> Result<Self, RouteError> {
        Ok(Self {
            node: fixed(node)?,
            property: fixed(property)?,
            value: fixed(value)?,
        })
    }

    /// Build from `<root>/<device>/<node>/<property>/set` and its payload.
    pub fn from_topic(topic: &str, payload: &str) -> Result<Self, RouteError> {
        let parts: Vec<&str> = topic.split('/').collect();
        if parts.len() < 5 || parts.last() != Some(&"set") {
            return Err(RouteError::MalformedTopic);
        }
        let (node, property) = (parts[2], parts[3]);
        if node.is_empty() || property.is_empty() {
            return Err(RouteError::MalformedTopic);
        }
        Self::new(node, property, payload)
    }
}

fn fixed<const N: usize>(s: &str) -> Result<heapless::String<N>, RouteError> {
    let mut out = heapless::String::new();
    out.push_str(s).map_err(|()| RouteError::FieldTooLong)?;
    Ok(out)
}
