//! Integration tests for inbound message routing.
//!
//! Messages enter as `(topic, payload)` pairs, are parsed into
//! `PropertyMessage`s and dispatched either to the controller or straight
//! to a pump.

use crate::mock_hw::{MockPlant, PumpCall, RecordingSink};

use poolcontrol::app::channels;
use poolcontrol::app::commands::PropertyMessage;
use poolcontrol::app::events::ControlEvent;
use poolcontrol::app::ports::{PumpId, Timestamp};
use poolcontrol::app::router::dispatch;
use poolcontrol::app::service::ModeController;
use poolcontrol::config::SystemConfig;
use poolcontrol::control::SwitchReason;
use poolcontrol::error::{PropertyError, RouteError};
use poolcontrol::mode::Mode;
use poolcontrol::timer::TimeOfDay;

fn make(mode: Mode) -> (ModeController, MockPlant, RecordingSink) {
    let ctl = ModeController::new(SystemConfig {
        mode,
        ..SystemConfig::default()
    });
    (ctl, MockPlant::new(Some(25.0), Some(60.0)), RecordingSink::new())
}

fn msg(topic: &str, payload: &str) -> PropertyMessage {
    PropertyMessage::from_topic(topic, payload).unwrap()
}

#[test]
fn mode_message_reaches_controller_and_publishes_status() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Auto);

    let m = msg("homie/pool-controller/operation-mode/mode/set", "boost");
    assert_eq!(dispatch(&m, &mut ctl, &mut hw, &mut sink), Ok(()));

    assert_eq!(ctl.mode(), Mode::Boost);
    let status = sink.events.iter().find_map(|e| match e {
        ControlEvent::Status(s) => Some(s.clone()),
        _ => None,
    });
    let status = status.expect("status snapshot after update");
    assert_eq!(status[0].key, "mode");
    assert_eq!(status[0].value.as_str(), "boost");
}

#[test]
fn rejected_property_surfaces_as_route_error() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Auto);

    let m = msg("homie/pool-controller/operation-mode/hysteresis/set", "abc");
    assert_eq!(
        dispatch(&m, &mut ctl, &mut hw, &mut sink),
        Err(RouteError::Property(PropertyError::InvalidNumber))
    );
    assert_eq!(ctl.thresholds().hysteresis_k, 1.0);
    assert_eq!(
        sink.count(|e| matches!(e, ControlEvent::Status(_))),
        0
    );
}

#[test]
fn switch_message_drives_pump_directly() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Manual);

    let m = msg("homie/pool-controller/pool-pump/switch/set", "ON");
    assert_eq!(dispatch(&m, &mut ctl, &mut hw, &mut sink), Ok(()));

    assert!(hw.pool_on());
    assert!(sink.events.iter().any(|e| matches!(
        e,
        ControlEvent::PumpSwitched {
            pump: PumpId::Pool,
            on: true,
            reason: SwitchReason::ManualSwitch
        }
    )));
}

#[test]
fn repeated_switch_is_idempotent() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Manual);

    let m = msg("homie/pool-controller/solar-pump/switch/set", "1");
    dispatch(&m, &mut ctl, &mut hw, &mut sink).unwrap();
    dispatch(&m, &mut ctl, &mut hw, &mut sink).unwrap();

    assert!(hw.solar_on());
    assert_eq!(sink.switches(), vec![(PumpId::Solar, true)]);
}

#[test]
fn invalid_switch_value_is_rejected() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Manual);

    let m = msg("homie/pool-controller/pool-pump/switch/set", "maybe");
    assert_eq!(
        dispatch(&m, &mut ctl, &mut hw, &mut sink),
        Err(RouteError::InvalidSwitchValue)
    );
    assert!(hw.calls().is_empty());
    assert!(sink.events.iter().any(|e| matches!(
        e,
        ControlEvent::MessageRejected(RouteError::InvalidSwitchValue)
    )));
}

#[test]
fn unknown_node_and_property_are_rejected() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Manual);

    let m = msg("homie/pool-controller/heat-pump/switch/set", "on");
    assert_eq!(
        dispatch(&m, &mut ctl, &mut hw, &mut sink),
        Err(RouteError::UnknownNode)
    );

    let m = msg("homie/pool-controller/pool-pump/speed/set", "3");
    assert_eq!(
        dispatch(&m, &mut ctl, &mut hw, &mut sink),
        Err(RouteError::UnknownProperty)
    );
    assert!(hw.calls().is_empty());
}

#[test]
fn auto_overrides_direct_switch_on_next_tick() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Auto);
    let night = Timestamp::new(0, TimeOfDay::new(22, 0));

    let m = msg("homie/pool-controller/pool-pump/switch/set", "on");
    dispatch(&m, &mut ctl, &mut hw, &mut sink).unwrap();
    assert!(hw.pool_on());

    ctl.tick(night, &mut hw, &mut sink);
    assert!(!hw.pool_on());
}

#[test]
fn manual_keeps_direct_switch_across_ticks() {
    let (mut ctl, mut hw, mut sink) = make(Mode::Manual);
    hw.clear_calls();

    let m = msg("homie/pool-controller/pool-pump/switch/set", "true");
    dispatch(&m, &mut ctl, &mut hw, &mut sink).unwrap();
    ctl.tick(Timestamp::new(0, TimeOfDay::new(3, 0)), &mut hw, &mut sink);
    ctl.tick(Timestamp::new(60_000, TimeOfDay::new(3, 1)), &mut hw, &mut sink);

    assert!(hw.pool_on());
    assert_eq!(hw.calls(), vec![PumpCall { pump: PumpId::Pool, on: true }]);
}

#[test]
fn inbox_is_bounded_and_fifo() {
    while channels::next().is_some() {}

    for i in 0..8 {
        let value = format!("{}", 20 + i);
        assert!(channels::post(
            PropertyMessage::new("operation-mode", "pool-max-temp", &value).unwrap()
        ));
    }
    let overflow = PropertyMessage::new("operation-mode", "pool-max-temp", "99").unwrap();
    assert!(!channels::post(overflow), "ninth message must be dropped");

    let values: Vec<String> = std::iter::from_fn(channels::next)
        .map(|m| m.value.to_string())
        .collect();
    assert_eq!(values, (20..28).map(|v| v.to_string()).collect::<Vec<_>>());
}
