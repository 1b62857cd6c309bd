//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to
//! the `log` facade (console in the host binary).  A broker publisher
//! would implement the same trait.

use log::{info, warn};

use crate::app::events::ControlEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControlEvent`] as one line.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn temp(t: Option<f32>) -> String {
    t.map_or_else(|| String::from("--"), |c| format!("{c:.2}"))
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::Started(mode) => {
                info!("START | mode={}", mode);
            }
            ControlEvent::ModeChanged { from, to } => {
                info!("MODE  | {} -> {}", from, to);
            }
            ControlEvent::PropertyChanged { property } => {
                info!("PROP  | {} updated", property);
            }
            ControlEvent::PropertyRejected { property, error } => match property {
                Some(p) => warn!("PROP  | {} rejected: {}", p, error),
                None => warn!("PROP  | rejected: {}", error),
            },
            ControlEvent::MessageRejected(error) => {
                warn!("PROP  | message rejected: {}", error);
            }
            ControlEvent::PumpSwitched { pump, on, reason } => {
                info!("PUMP  | {} {} ({})", pump.node_id(), on_off(*on), reason);
            }
            ControlEvent::SensorUnavailable(probe) => {
                warn!("PUMP  | {:?} temperature unavailable", probe);
            }
            ControlEvent::Cycle(r) => {
                info!(
                    "CYCLE | mode={} | pool={}°C solar={}°C | pool-pump={} solar-pump={}",
                    r.mode,
                    temp(r.pool_temp),
                    temp(r.solar_temp),
                    on_off(r.pool_pump_on),
                    on_off(r.solar_pump_on),
                );
            }
            ControlEvent::Status(snapshot) => {
                let line = snapshot
                    .iter()
                    .map(|e| format!("{}={}", e.key, e.value))
                    .collect::<Vec<_>>()
                    .join(" ");
                info!("STATUS | {}", line);
            }
        }
    }
}
