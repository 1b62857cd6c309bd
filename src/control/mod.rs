//! Pump control strategies.
//!
//! Each [`Mode`] maps to one pure rule in [`rules`].  A rule sees a
//! read-only [`RuleContext`] (temperatures, thresholds, timer window and
//! the current pump states) and returns a [`Decision`]: an optional
//! command per pump.  Rules keep no state between ticks; the only state
//! that survives a tick is the actual relay state, owned by the actuator.
//!
//! ```text
//!  (pool_on, solar_on) × temperatures × config ──rule──▶ Decision
//!                                                         │
//!                              ModeController applies ◀───┘
//! ```

pub mod rules;

use core::fmt;

use crate::config::Thresholds;
use crate::mode::Mode;
use crate::timer::{TimeOfDay, TimerWindow};

/// Snapshot handed to a rule for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleContext {
    /// Wall-clock time used for the timer window.
    pub now: TimeOfDay,
    /// Pool water temperature, `None` if the probe is unavailable.
    pub pool_temp: Option<f32>,
    /// Solar collector temperature, `None` if the probe is unavailable.
    pub solar_temp: Option<f32>,
    pub thresholds: Thresholds,
    pub window: TimerWindow,
    /// Pool pump relay state at the start of the tick.
    pub pool_pump_on: bool,
    /// Solar pump relay state at the start of the tick.
    pub solar_pump_on: bool,
}

/// Why a rule asked for a pump state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchReason {
    /// Pool pump follows the timer window.
    TimerWindow,
    /// Pool pump is off, so solar must be off too.
    PoolPumpOff,
    /// A temperature reading is missing.
    SensorUnavailable,
    /// Collector dropped below the minimum minus hysteresis.
    SolarBelowMinimum,
    /// Pool reached its maximum plus hysteresis.
    PoolAtMaximum,
    /// Pool caught up with the collector.
    PoolReachedSolar,
    /// Collector is hot enough and warmer than the pool.
    SolarGain,
    /// Timer mode never heats.
    TimerModeNoSolar,
    /// Operator switched the pump directly.
    ManualSwitch,
    /// Controller is shutting down.
    Shutdown,
}

impl fmt::Display for SwitchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TimerWindow => "timer window",
            Self::PoolPumpOff => "pool pump off",
            Self::SensorUnavailable => "temperature unavailable",
            Self::SolarBelowMinimum => "solar below minimum",
            Self::PoolAtMaximum => "pool at maximum",
            Self::PoolReachedSolar => "pool reached solar",
            Self::SolarGain => "solar gain available",
            Self::TimerModeNoSolar => "timer mode",
            Self::ManualSwitch => "manual switch",
            Self::Shutdown => "shutdown",
        };
        f.write_str(s)
    }
}

/// Desired energization of one pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub on: bool,
    pub reason: SwitchReason,
}

impl Command {
    pub const fn on(reason: SwitchReason) -> Self {
        Self { on: true, reason }
    }

    pub const fn off(reason: SwitchReason) -> Self {
        Self { on: false, reason }
    }
}

/// Output of a rule: `None` leaves that pump untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    pub pool: Option<Command>,
    pub solar: Option<Command>,
}

impl Decision {
    /// No commands at all.
    pub const NONE: Decision = Decision {
        pool: None,
        solar: None,
    };

    /// Pump states after applying this decision on top of `ctx`.
    pub fn resulting_states(&self, ctx: &RuleContext) -> (bool, bool) {
        (
            self.pool.map_or(ctx.pool_pump_on, |c| c.on),
            self.solar.map_or(ctx.solar_pump_on, |c| c.on),
        )
    }
}

/// Run the rule for `mode`.
pub fn apply(mode: Mode, ctx: &RuleContext) -> Decision {
    match mode {
        Mode::Auto => rules::auto(ctx),
        Mode::Manual => rules::manual(ctx),
        Mode::Timer => rules::timer(ctx),
        Mode::Boost => rules::boost(ctx),
    }
}
