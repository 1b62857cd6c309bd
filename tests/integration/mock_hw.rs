//! Mock plant adapter for integration tests.
//!
//! Records every pump command in one shared, ordered log so tests can
//! assert on the full command history (including pool/solar ordering)
//! without touching real GPIO.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use poolcontrol::app::events::ControlEvent;
use poolcontrol::app::ports::{
    ConfigError, ConfigPort, EventSink, PlantPort, Probe, PumpActuator, PumpId, TemperatureSensor,
};
use poolcontrol::config::SystemConfig;

// ── Pump call record ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpCall {
    pub pump: PumpId,
    pub on: bool,
}

pub type CallLog = Rc<RefCell<Vec<PumpCall>>>;

// ── MockSensor ────────────────────────────────────────────────

pub struct MockSensor {
    pub value: Option<f32>,
    pub reads: u32,
}

impl TemperatureSensor for MockSensor {
    fn read(&mut self) -> Option<f32> {
        self.reads += 1;
        self.value
    }
}

// ── MockPump ──────────────────────────────────────────────────

pub struct MockPump {
    id: PumpId,
    on: bool,
    log: CallLog,
}

impl PumpActuator for MockPump {
    fn state(&self) -> bool {
        self.on
    }

    fn set_state(&mut self, on: bool) {
        self.log.borrow_mut().push(PumpCall { pump: self.id, on });
        self.on = on;
    }
}

// ── MockPlant ─────────────────────────────────────────────────

pub struct MockPlant {
    pub pool_probe: MockSensor,
    pub solar_probe: MockSensor,
    pub pool_pump: MockPump,
    pub solar_pump: MockPump,
    pub calls: CallLog,
}

#[allow(dead_code)]
impl MockPlant {
    pub fn new(pool_temp: Option<f32>, solar_temp: Option<f32>) -> Self {
        let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
        Self {
            pool_probe: MockSensor {
                value: pool_temp,
                reads: 0,
            },
            solar_probe: MockSensor {
                value: solar_temp,
                reads: 0,
            },
            pool_pump: MockPump {
                id: PumpId::Pool,
                on: false,
                log: Rc::clone(&calls),
            },
            solar_pump: MockPump {
                id: PumpId::Solar,
                on: false,
                log: Rc::clone(&calls),
            },
            calls,
        }
    }

    /// Force relay states without recording a call.
    pub fn with_pumps(mut self, pool_on: bool, solar_on: bool) -> Self {
        self.pool_pump.on = pool_on;
        self.solar_pump.on = solar_on;
        self
    }

    pub fn set_temps(&mut self, pool: Option<f32>, solar: Option<f32>) {
        self.pool_probe.value = pool;
        self.solar_probe.value = solar;
    }

    pub fn pool_on(&self) -> bool {
        self.pool_pump.on
    }

    pub fn solar_on(&self) -> bool {
        self.solar_pump.on
    }

    pub fn calls(&self) -> Vec<PumpCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PlantPort for MockPlant {
    type Sensor = MockSensor;
    type Pump = MockPump;

    fn sensor(&mut self, probe: Probe) -> &mut MockSensor {
        match probe {
            Probe::Pool => &mut self.pool_probe,
            Probe::Solar => &mut self.solar_probe,
        }
    }

    fn pump(&mut self, pump: PumpId) -> &mut MockPump {
        match pump {
            PumpId::Pool => &mut self.pool_pump,
            PumpId::Solar => &mut self.solar_pump,
        }
    }

    fn pump_ref(&self, pump: PumpId) -> &MockPump {
        match pump {
            PumpId::Pool => &self.pool_pump,
            PumpId::Solar => &self.solar_pump,
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that records every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControlEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switches(&self) -> Vec<(PumpId, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControlEvent::PumpSwitched { pump, on, .. } => Some((*pump, *on)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&ControlEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControlEvent) {
        self.events.push(event.clone());
    }
}

// ── MockConfigStore ───────────────────────────────────────────

/// In-memory config store that counts saves and can be told to fail.
#[derive(Default)]
pub struct MockConfigStore {
    pub saved: RefCell<Vec<SystemConfig>>,
    pub fail: Cell<bool>,
}

#[allow(dead_code)]
impl MockConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saved.borrow().len()
    }

    pub fn last_saved(&self) -> Option<SystemConfig> {
        self.saved.borrow().last().cloned()
    }
}

impl ConfigPort for MockConfigStore {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        self.last_saved().ok_or(ConfigError::NotFound)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        if self.fail.get() {
            return Err(ConfigError::IoError);
        }
        config.validate().map_err(ConfigError::ValidationFailed)?;
        self.saved.borrow_mut().push(config.clone());
        Ok(())
    }
}
