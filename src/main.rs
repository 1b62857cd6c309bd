//! Pool controller host binary.
//!
//! Runs the controller against a simulated plant.  Control messages are
//! read from stdin, one per line:
//!
//! ```text
//! homie/pool-controller/operation-mode/mode/set boost
//! homie/pool-controller/pool-pump/switch/set on
//! sim/solar 62.5
//! sim/pool disconnect
//! ```
//!
//! `sim/<probe>` lines change the simulated temperatures instead of
//! reaching the controller.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{info, warn};

use poolcontrol::adapters::config_file::JsonConfigFile;
use poolcontrol::adapters::hardware::Plant;
use poolcontrol::adapters::log_sink::LogEventSink;
use poolcontrol::adapters::sim::{SimPin, SimThermometer};
use poolcontrol::adapters::time::SystemClock;
use poolcontrol::app::channels;
use poolcontrol::app::commands::PropertyMessage;
use poolcontrol::app::events::ControlEvent;
use poolcontrol::app::ports::{ClockPort, EventSink};
use poolcontrol::app::router;
use poolcontrol::app::service::ModeController;
use poolcontrol::config::SystemConfig;
use poolcontrol::drivers::RelayPump;
use poolcontrol::sensors::TemperatureProbe;

const DEFAULT_CONFIG_PATH: &str = "poolcontrol.json";

/// Environment variable holding the log filter (`error` … `trace`).
const LOG_LEVEL_ENV: &str = "POOLCONTROL_LOG";

/// Control loop period.  Ticks are still paced by the measurement interval.
const LOOP_PERIOD: Duration = Duration::from_secs(1);

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV, "info")).init();
    info!("poolcontrol v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config (or defaults) ──────────────────────────
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from(DEFAULT_CONFIG_PATH));
    let storage = JsonConfigFile::new(path);
    let config = match storage.load_or_init() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(
                "Config at {} unusable ({}), running with defaults",
                storage.path().display(),
                e
            );
            SystemConfig::default()
        }
    };
    let device_id = config.device_id.clone();
    info!("Device ID: {}", device_id);

    // ── 3. Simulated plant ────────────────────────────────────
    let pool_thermo = SimThermometer::new(24.0);
    let solar_thermo = SimThermometer::new(60.0);
    let missed = config.sensor_max_missed_reads;
    let mut plant = Plant::new(
        TemperatureProbe::new("pool", pool_thermo.driver(), missed),
        TemperatureProbe::new("solar", solar_thermo.driver(), missed),
        RelayPump::new("pool-pump", SimPin::new()),
        RelayPump::new("solar-pump", SimPin::new()),
    );

    // ── 4. Controller ─────────────────────────────────────────
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();
    let mut controller = ModeController::new(config);
    controller.start(&mut sink);
    sink.emit(&ControlEvent::Status(controller.status_snapshot()));

    // ── 5. Ctrl-C and stdin reader ────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("installing Ctrl-C handler")?;

    thread::Builder::new()
        .name(String::from("stdin-reader"))
        .spawn(move || read_stdin(&device_id, &pool_thermo, &solar_thermo))
        .context("spawning stdin reader")?;

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    while running.load(Ordering::SeqCst) {
        let now = clock.now();

        while let Some(msg) = channels::next() {
            // Rejections are logged and emitted by the router.
            let _ = router::dispatch(&msg, &mut controller, &mut plant, &mut sink);
        }

        if controller.tick(now, &mut plant, &mut sink) {
            sink.emit(&ControlEvent::Status(controller.status_snapshot()));
        }

        controller.auto_save_if_needed(now.uptime_ms, &storage);
        thread::sleep(LOOP_PERIOD);
    }

    // ── 7. Shutdown ───────────────────────────────────────────
    controller.shutdown(&mut plant, &mut sink);
    controller.force_save_if_dirty(&storage);
    info!("Stopped");
    Ok(())
}

// ── Stdin reader ──────────────────────────────────────────────

fn read_stdin(device_id: &str, pool: &SimThermometer, solar: &SimThermometer) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else {
            warn!("stdin closed");
            return;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (topic, payload) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let payload = payload.trim();

        if let Some(probe) = topic.strip_prefix("sim/") {
            let target = match probe {
                "pool" => pool,
                "solar" => solar,
                _ => {
                    warn!("Unknown simulated probe {:?}", probe);
                    continue;
                }
            };
            apply_sim(probe, target, payload);
            continue;
        }

        if topic.split('/').nth(1) != Some(device_id) {
            warn!("Ignoring message for another device: {}", topic);
            continue;
        }
        match PropertyMessage::from_topic(topic, payload) {
            Ok(msg) => {
                channels::post(msg);
            }
            Err(e) => warn!("Ignoring {}: {}", topic, e),
        }
    }
}

fn apply_sim(probe: &str, thermo: &SimThermometer, payload: &str) {
    match payload {
        "disconnect" => thermo.set_connected(false),
        "connect" => thermo.set_connected(true),
        raw => match raw.parse::<f32>() {
            Ok(celsius) => thermo.set(celsius),
            Err(_) => {
                warn!("Bad simulated temperature {:?}", raw);
                return;
            }
        },
    }
    info!("SIM   | {} probe <- {}", probe, payload);
}
