//! Fuzz target: inbound message path
//!
//! Splits arbitrary input into a topic and a payload, runs it through
//! `PropertyMessage::from_topic`, and dispatches whatever parses into a
//! controller backed by an in-memory plant.  Asserts that nothing panics
//! and that a rejected update never changes the configuration.
//!
//! cargo fuzz run fuzz_property_message

#![no_main]

use libfuzzer_sys::fuzz_target;
use poolcontrol::app::commands::PropertyMessage;
use poolcontrol::app::events::ControlEvent;
use poolcontrol::app::ports::{EventSink, PlantPort, Probe, PumpActuator, PumpId, TemperatureSensor};
use poolcontrol::app::router;
use poolcontrol::app::service::ModeController;
use poolcontrol::config::SystemConfig;

struct Probe25;
impl TemperatureSensor for Probe25 {
    fn read(&mut self) -> Option<f32> {
        Some(25.0)
    }
}

struct Pump(bool);
impl PumpActuator for Pump {
    fn state(&self) -> bool {
        self.0
    }
    fn set_state(&mut self, on: bool) {
        self.0 = on;
    }
}

struct Plant {
    probe: Probe25,
    pumps: [Pump; 2],
}

impl PlantPort for Plant {
    type Sensor = Probe25;
    type Pump = Pump;

    fn sensor(&mut self, _probe: Probe) -> &mut Probe25 {
        &mut self.probe
    }
    fn pump(&mut self, pump: PumpId) -> &mut Pump {
        &mut self.pumps[pump as usize]
    }
    fn pump_ref(&self, pump: PumpId) -> &Pump {
        &self.pumps[pump as usize]
    }
}

struct Discard;
impl EventSink for Discard {
    fn emit(&mut self, _event: &ControlEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let (topic, payload) = text.split_once(' ').unwrap_or((text, ""));

    let Ok(msg) = PropertyMessage::from_topic(topic, payload) else {
        return;
    };

    let mut controller = ModeController::new(SystemConfig::default());
    let mut plant = Plant {
        probe: Probe25,
        pumps: [Pump(false), Pump(false)],
    };
    let before = controller.current_config();

    if router::dispatch(&msg, &mut controller, &mut plant, &mut Discard).is_err() {
        assert_eq!(controller.current_config(), before, "rejected update changed config");
    }
    assert!(controller.current_config().validate().is_ok());
});
