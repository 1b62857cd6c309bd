//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ModeController (domain)
//! ```
//!
//! Driven adapters (temperature probes, relays, event sinks, config
//! storage) implement these traits.  The
//! [`ModeController`](super::service::ModeController) receives them at the
//! call site, so the domain core never owns or touches hardware directly.
//!
//! ## Contracts
//!
//! - A [`TemperatureSensor`] either has a reading for this cycle or it
//!   does not.  Absence is not an error; the rules fail safe on it.
//! - [`PumpActuator::set_state`] is idempotent and immediately visible to
//!   the next [`PumpActuator::state`].  It cannot fail at this layer.
//! - [`ConfigPort`] implementations MUST validate before persisting.

use crate::config::SystemConfig;
use crate::timer::TimeOfDay;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A single temperature probe.
pub trait TemperatureSensor {
    /// Current reading in °C, or `None` if unavailable this cycle.
    fn read(&mut self) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// An on/off pump relay.
pub trait PumpActuator {
    /// Whether the pump is currently energized.
    fn state(&self) -> bool;

    /// Energize (`true`) or de-energize (`false`) the pump.
    fn set_state(&mut self, on: bool);
}

/// Which of the two probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Pool,
    Solar,
}

/// Which of the two pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpId {
    /// Circulation pump.
    Pool,
    /// Solar heating pump.
    Solar,
}

impl PumpId {
    /// Node id on the message surface.
    pub const fn node_id(self) -> &'static str {
        match self {
            Self::Pool => "pool-pump",
            Self::Solar => "solar-pump",
        }
    }
}

/// The installation as seen by the controller: two probes, two pumps.
///
/// The controller borrows this for the duration of a tick; the same
/// pumps are also reached by the direct `switch` path, so both paths go
/// through the same [`PumpActuator::set_state`].
pub trait PlantPort {
    type Sensor: TemperatureSensor;
    type Pump: PumpActuator;

    fn sensor(&mut self, probe: Probe) -> &mut Self::Sensor;

    fn pump(&mut self, pump: PumpId) -> &mut Self::Pump;

    /// Read-only pump access for status queries.
    fn pump_ref(&self, pump: PumpId) -> &Self::Pump;
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// A point in time as the controller needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Monotonic milliseconds since boot, used for tick pacing.
    pub uptime_ms: u64,
    /// Local wall-clock time, used for the timer window.
    pub time_of_day: TimeOfDay,
}

impl Timestamp {
    pub const fn new(uptime_ms: u64, time_of_day: TimeOfDay) -> Self {
        Self {
            uptime_ms,
            time_of_day,
        }
    }
}

/// Source of [`Timestamp`]s.
pub trait ClockPort {
    fn now(&self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ControlEvent`](super::events::ControlEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ControlEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ConfigError::NotFound`] if nothing has been stored yet.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
