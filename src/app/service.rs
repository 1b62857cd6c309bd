//! Operation-mode controller, the hexagonal core.
//!
//! [`ModeController`] owns the configuration (mode, thresholds, timer
//! window) and turns each periodic tick into pump commands by running
//! the active rule.  All I/O flows through port traits injected at call
//! sites, making the controller testable with mock adapters.
//!
//! ```text
//!  TemperatureSensor ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                        │      ModeController      │
//!     PumpActuator   ◀── │  config · rule dispatch  │ ◀── handle_property
//!                        └──────────────────────────┘
//! ```
//!
//! Mutation happens only through `&mut self`, so a tick always observes a
//! fully applied property update.  The control loop serialises inbound
//! messages and ticks through [`channels`](super::channels).

use core::fmt::Write as _;

use log::{debug, info, warn};

use crate::config::{SystemConfig, Thresholds};
use crate::control::{self, Command, Decision, RuleContext, SwitchReason};
use crate::error::PropertyError;
use crate::mode::Mode;
use crate::timer::TimerWindow;

use super::commands::Property;
use super::events::{ControlEvent, CycleReport};
use super::ports::{
    ConfigPort, EventSink, PlantPort, Probe, PumpActuator, PumpId, TemperatureSensor, Timestamp,
};

/// Rendered value of one status entry.
pub type StatusValue = heapless::String<24>;

/// One `(key, value)` pair of the status surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub key: &'static str,
    pub value: StatusValue,
}

/// The fixed, ordered status list.
pub type StatusSnapshot = heapless::Vec<StatusEntry, 8>;

// ───────────────────────────────────────────────────────────────
// ModeController
// ───────────────────────────────────────────────────────────────

/// Decides pump states from temperatures, mode and timer window.
pub struct ModeController {
    config: SystemConfig,
    /// Uptime of the last tick that ran a rule.
    last_tick_ms: Option<u64>,
    tick_count: u64,
    config_dirty: bool,
    /// Uptime at which the autosave check first saw the pending change.
    dirty_since_ms: Option<u64>,
}

impl ModeController {
    /// Construct the controller from a validated configuration.
    ///
    /// The first [`tick`](Self::tick) after construction always runs.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            last_tick_ms: None,
            tick_count: 0,
            config_dirty: false,
            dirty_since_ms: None,
        }
    }

    /// Announce the controller and its initial mode.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!(
            "ModeController started in {} (interval {}s, window {:02}:{:02}-{:02}:{:02})",
            self.config.mode,
            self.config.measurement_interval_secs,
            self.config.timer.start_hour,
            self.config.timer.start_minute,
            self.config.timer.end_hour,
            self.config.timer.end_minute,
        );
        sink.emit(&ControlEvent::Started(self.config.mode));
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle if the measurement interval has elapsed:
    /// read probes → build context → run the active rule → apply commands.
    ///
    /// Returns `true` if the cycle ran.
    pub fn tick(
        &mut self,
        now: Timestamp,
        hw: &mut impl PlantPort,
        sink: &mut impl EventSink,
    ) -> bool {
        if let Some(last) = self.last_tick_ms {
            if now.uptime_ms.saturating_sub(last) < self.measurement_interval_ms() {
                return false;
            }
        }
        self.last_tick_ms = Some(now.uptime_ms);
        self.tick_count += 1;

        // 1. Read probes
        let pool_temp = read_probe(hw, Probe::Pool, sink);
        let solar_temp = read_probe(hw, Probe::Solar, sink);

        // 2. Build the rule context from config and relay states
        let ctx = RuleContext {
            now: now.time_of_day,
            pool_temp,
            solar_temp,
            thresholds: self.config.thresholds,
            window: self.config.timer,
            pool_pump_on: hw.pump_ref(PumpId::Pool).state(),
            solar_pump_on: hw.pump_ref(PumpId::Solar).state(),
        };

        // 3. Pure decision
        let mode = self.config.mode;
        let decision = control::apply(mode, &ctx);
        debug!("tick #{} mode={} ctx={:?} -> {:?}", self.tick_count, mode, ctx, decision);

        // 4. Apply via PumpActuator
        apply_decision(&decision, hw, sink);

        sink.emit(&ControlEvent::Cycle(CycleReport {
            mode,
            pool_temp,
            solar_temp,
            pool_pump_on: hw.pump_ref(PumpId::Pool).state(),
            solar_pump_on: hw.pump_ref(PumpId::Solar).state(),
        }));
        true
    }

    /// Switch both pumps off (solar first) ahead of process exit.
    pub fn shutdown(&mut self, hw: &mut impl PlantPort, sink: &mut impl EventSink) {
        info!("ModeController shutting down, pumps off");
        apply_decision(
            &Decision {
                pool: Some(Command::off(SwitchReason::Shutdown)),
                solar: Some(Command::off(SwitchReason::Shutdown)),
            },
            hw,
            sink,
        );
    }

    // ── Mode ──────────────────────────────────────────────────

    /// Parse and select a mode.  Unknown names leave the mode unchanged.
    pub fn set_mode(
        &mut self,
        candidate: &str,
        sink: &mut impl EventSink,
    ) -> Result<Mode, PropertyError> {
        match candidate.parse::<Mode>() {
            Ok(mode) => {
                self.select_mode(mode, sink);
                Ok(mode)
            }
            Err(e) => {
                warn!("Invalid operation mode: {:?}", candidate);
                Err(e)
            }
        }
    }

    /// Select a mode.  Takes effect on the next tick.
    pub fn select_mode(&mut self, mode: Mode, sink: &mut impl EventSink) {
        let from = self.config.mode;
        if from == mode {
            return;
        }
        self.config.mode = mode;
        self.mark_config_dirty();
        info!("Operation mode set to: {}", mode);
        sink.emit(&ControlEvent::ModeChanged { from, to: mode });
    }

    // ── Property surface ──────────────────────────────────────

    /// Apply one property-set request.  Either the whole update is applied
    /// or nothing changes.
    pub fn handle_property(
        &mut self,
        name: &str,
        raw: &str,
        sink: &mut impl EventSink,
    ) -> Result<Property, PropertyError> {
        let property = match name.parse::<Property>() {
            Ok(p) => p,
            Err(error) => {
                warn!("Unknown property {:?}", name);
                sink.emit(&ControlEvent::PropertyRejected { property: None, error });
                return Err(error);
            }
        };

        match self.apply_property(property, raw.trim(), sink) {
            Ok(()) => {
                sink.emit(&ControlEvent::PropertyChanged { property });
                Ok(property)
            }
            Err(error) => {
                warn!("Invalid value for {}: {:?} ({})", property, raw, error);
                sink.emit(&ControlEvent::PropertyRejected {
                    property: Some(property),
                    error,
                });
                Err(error)
            }
        }
    }

    fn apply_property(
        &mut self,
        property: Property,
        raw: &str,
        sink: &mut impl EventSink,
    ) -> Result<(), PropertyError> {
        let mut thresholds = self.config.thresholds;
        let mut timer = self.config.timer;
        match property {
            Property::Mode => return self.set_mode(raw, sink).map(|_| ()),
            Property::PoolMaxTemp => thresholds.pool_max_temp_c = parse_temperature(raw)?,
            Property::SolarMinTemp => thresholds.solar_min_temp_c = parse_temperature(raw)?,
            Property::Hysteresis => {
                let k = parse_temperature(raw)?;
                if k < 0.0 {
                    return Err(PropertyError::OutOfRange("hysteresis must be >= 0"));
                }
                thresholds.hysteresis_k = k;
            }
            Property::TimerStartHour => timer.start_hour = parse_hour(raw)?,
            Property::TimerStartMinutes => timer.start_minute = parse_minute(raw)?,
            Property::TimerEndHour => timer.end_hour = parse_hour(raw)?,
            Property::TimerEndMinutes => timer.end_minute = parse_minute(raw)?,
        }

        self.config.thresholds = thresholds;
        self.config.timer = timer;
        self.mark_config_dirty();
        info!("{} set to {}", property, self.render(property));
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Ordered key/value list for status publication.
    pub fn status_snapshot(&self) -> StatusSnapshot {
        let mut snapshot = StatusSnapshot::new();
        for property in Property::ALL {
            // Capacity matches Property::ALL.
            let _ = snapshot.push(StatusEntry {
                key: property.as_str(),
                value: self.render(property),
            });
        }
        snapshot
    }

    fn render(&self, property: Property) -> StatusValue {
        let mut out = StatusValue::new();
        let t = &self.config.thresholds;
        let w = &self.config.timer;
        // Debug formatting keeps a fractional digit on whole floats ("1.0").
        let _ = match property {
            Property::Mode => {
                out.push_str(self.config.mode.as_str()).map_err(|()| core::fmt::Error)
            }
            Property::PoolMaxTemp => write!(out, "{:?}", t.pool_max_temp_c),
            Property::SolarMinTemp => write!(out, "{:?}", t.solar_min_temp_c),
            Property::Hysteresis => write!(out, "{:?}", t.hysteresis_k),
            Property::TimerStartHour => write!(out, "{}", w.start_hour),
            Property::TimerStartMinutes => write!(out, "{}", w.start_minute),
            Property::TimerEndHour => write!(out, "{}", w.end_hour),
            Property::TimerEndMinutes => write!(out, "{}", w.end_minute),
        };
        out
    }

    /// Currently active mode.
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn thresholds(&self) -> Thresholds {
        self.config.thresholds
    }

    pub fn timer_window(&self) -> TimerWindow {
        self.config.timer
    }

    pub fn measurement_interval_ms(&self) -> u64 {
        u64::from(self.config.measurement_interval_secs) * 1000
    }

    /// Uptime of the last tick that ran, if any.
    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }

    /// Ticks that actually ran a rule since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration (for persistence or read-back).
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }

    // ── Config dirty-flag management ──────────────────────────

    /// Mark the config as modified.  Restarts the autosave quiet period.
    pub fn mark_config_dirty(&mut self) {
        self.config_dirty = true;
        self.dirty_since_ms = None;
    }

    /// Save once the config has been unchanged for `autosave_delay_secs`.
    /// Returns `true` if the config was saved.
    pub fn auto_save_if_needed(&mut self, now_ms: u64, storage: &impl ConfigPort) -> bool {
        if !self.config_dirty {
            return false;
        }
        let since = *self.dirty_since_ms.get_or_insert(now_ms);
        let delay_ms = u64::from(self.config.autosave_delay_secs) * 1000;
        if now_ms.saturating_sub(since) < delay_ms {
            return false;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                self.dirty_since_ms = None;
                info!("Config auto-saved");
                true
            }
            Err(e) => {
                warn!("Config auto-save failed: {}", e);
                // Retry after another quiet period.
                self.dirty_since_ms = Some(now_ms);
                false
            }
        }
    }

    /// Force-save if dirty (call before shutdown).
    pub fn force_save_if_dirty(&mut self, storage: &impl ConfigPort) {
        if !self.config_dirty {
            return;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                self.dirty_since_ms = None;
                info!("Config force-saved before shutdown");
            }
            Err(e) => warn!("Config force-save failed: {}", e),
        }
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }
}

// ── Internal ──────────────────────────────────────────────────

fn read_probe(hw: &mut impl PlantPort, probe: Probe, sink: &mut impl EventSink) -> Option<f32> {
    let reading = hw.sensor(probe).read();
    if reading.is_none() {
        debug!("{:?} probe has no reading this cycle", probe);
        sink.emit(&ControlEvent::SensorUnavailable(probe));
    }
    reading
}

/// Apply a decision so the solar pump never runs without circulation:
/// solar-off goes before any pool change, solar-on after it.
fn apply_decision(decision: &Decision, hw: &mut impl PlantPort, sink: &mut impl EventSink) {
    let solar_first = matches!(decision.solar, Some(Command { on: false, .. }));
    if solar_first {
        apply_command(hw, PumpId::Solar, decision.solar, sink);
        apply_command(hw, PumpId::Pool, decision.pool, sink);
    } else {
        apply_command(hw, PumpId::Pool, decision.pool, sink);
        apply_command(hw, PumpId::Solar, decision.solar, sink);
    }
}

fn apply_command(
    hw: &mut impl PlantPort,
    id: PumpId,
    command: Option<Command>,
    sink: &mut impl EventSink,
) {
    let Some(cmd) = command else {
        return;
    };
    let pump = hw.pump(id);
    let was_on = pump.state();
    pump.set_state(cmd.on);
    if was_on != cmd.on {
        info!(
            "{} {} ({})",
            id.node_id(),
            if cmd.on { "ON" } else { "OFF" },
            cmd.reason
        );
        sink.emit(&ControlEvent::PumpSwitched {
            pump: id,
            on: cmd.on,
            reason: cmd.reason,
        });
    }
}

fn parse_temperature(raw: &str) -> Result<f32, PropertyError> {
    let value: f32 = raw.parse().map_err(|_| PropertyError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(PropertyError::OutOfRange("value must be finite"));
    }
    // "-0" parses to negative zero, which would render as "-0.0".
    if value == 0.0 {
        return Ok(0.0);
    }
    Ok(value)
}

fn parse_hour(raw: &str) -> Result<u8, PropertyError> {
    let hour: u8 = raw.parse().map_err(|_| PropertyError::InvalidNumber)?;
    if hour > 23 {
        return Err(PropertyError::OutOfRange("hour must be 0-23"));
    }
    Ok(hour)
}

fn parse_minute(raw: &str) -> Result<u8, PropertyError> {
    let minute: u8 = raw.parse().map_err(|_| PropertyError::InvalidNumber)?;
    if minute > 59 {
        return Err(PropertyError::OutOfRange("minute must be 0-59"));
    }
    Ok(minute)
}
