//! Inbound message dispatch.
//!
//! `operation-mode` messages go to the [`ModeController`]; `switch`
//! messages on a pump node go straight to that pump's actuator and bypass
//! the control rules.  Rules that command a pump (Auto, Timer) will
//! override a direct switch on their next tick.

use log::{info, warn};

use crate::control::SwitchReason;
use crate::error::RouteError;

use super::commands::{CONTROLLER_NODE, PropertyMessage, SWITCH_PROPERTY, parse_switch};
use super::events::ControlEvent;
use super::ports::{EventSink, PlantPort, PumpActuator, PumpId};
use super::service::ModeController;

/// Route one message.  On success after a controller update the new
/// status snapshot is emitted.
pub fn dispatch(
    msg: &PropertyMessage,
    controller: &mut ModeController,
    hw: &mut impl PlantPort,
    sink: &mut impl EventSink,
) -> Result<(), RouteError> {
    let node = msg.node.as_str();

    if node == CONTROLLER_NODE {
        // PropertyRejected is emitted by the controller itself.
        controller.handle_property(&msg.property, &msg.value, sink)?;
        sink.emit(&ControlEvent::Status(controller.status_snapshot()));
        return Ok(());
    }

    let result = match pump_for_node(node) {
        Some(id) => switch_pump(id, msg, hw, sink),
        None => Err(RouteError::UnknownNode),
    };
    if let Err(e) = result {
        warn!("Rejected message for {}/{}: {}", node, msg.property, e);
        sink.emit(&ControlEvent::MessageRejected(e));
    }
    result
}

fn pump_for_node(node: &str) -> Option<PumpId> {
    [PumpId::Pool, PumpId::Solar]
        .into_iter()
        .find(|id| id.node_id() == node)
}

fn switch_pump(
    id: PumpId,
    msg: &PropertyMessage,
    hw: &mut impl PlantPort,
    sink: &mut impl EventSink,
) -> Result<(), RouteError> {
    if msg.property.as_str() != SWITCH_PROPERTY {
        return Err(RouteError::UnknownProperty);
    }
    let on = parse_switch(&msg.value)?;

    let pump = hw.pump(id);
    let was_on = pump.state();
    pump.set_state(on);
    if was_on != on {
        info!("{} switched {} by operator", id.node_id(), if on { "ON" } else { "OFF" });
        sink.emit(&ControlEvent::PumpSwitched {
            pump: id,
            on,
            reason: SwitchReason::ManualSwitch,
        });
    }
    Ok(())
}
