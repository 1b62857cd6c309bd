//! Hardware adapter. Bridges probes and relays to the [`PlantPort`].
//!
//! Owns both temperature sensors and both pump actuators.  The concrete
//! driver types are generic so the same adapter serves real one-wire
//! probes with GPIO relays and the simulated devices in [`sim`](super::sim).

use crate::app::ports::{PlantPort, Probe, PumpActuator, PumpId, TemperatureSensor};

/// Concrete adapter that combines the installation behind [`PlantPort`].
pub struct Plant<S, P> {
    pool_probe: S,
    solar_probe: S,
    pool_pump: P,
    solar_pump: P,
}

impl<S: TemperatureSensor, P: PumpActuator> Plant<S, P> {
    pub fn new(pool_probe: S, solar_probe: S, pool_pump: P, solar_pump: P) -> Self {
        Self {
            pool_probe,
            solar_probe,
            pool_pump,
            solar_pump,
        }
    }
}

impl<S: TemperatureSensor, P: PumpActuator> PlantPort for Plant<S, P> {
    type Sensor = S;
    type Pump = P;

    fn sensor(&mut self, probe: Probe) -> &mut S {
        match probe {
            Probe::Pool => &mut self.pool_probe,
            Probe::Solar => &mut self.solar_probe,
        }
    }

    fn pump(&mut self, pump: PumpId) -> &mut P {
        match pump {
            PumpId::Pool => &mut self.pool_pump,
            PumpId::Solar => &mut self.solar_pump,
        }
    }

    fn pump_ref(&self, pump: PumpId) -> &P {
        match pump {
            PumpId::Pool => &self.pool_pump,
            PumpId::Solar => &self.solar_pump,
        }
    }
}
