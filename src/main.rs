//! Onboard actuator firmware: main entry point.
//!
//! ```text
//!  HalOutput<PinDriver>   FileConfigStore   SystemClock   LogEventSink
//!   (OutputDriver)         (ConfigPort)      (Clock)       (EventSink)
//!  ─────────────────────── Port Trait Boundary ───────────────────────
//!               ActuatorService: id → ActuatorEngine
//! ```
#![deny(unused_must_use)]

use std::ffi::CString;

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::{debug, info, warn};

use actuator::adapters::log_sink::LogEventSink;
use actuator::adapters::store::FileConfigStore;
use actuator::adapters::time::SystemClock;
use actuator::app::ports::Clock;
use actuator::app::service::ActuatorService;
use actuator::config::ActuatorConfig;
use actuator::drivers::output::HalOutput;
use actuator::pins;
use actuator::sensors::SensorDocument;

/// Mount the SPIFFS partition at [`pins::CONFIG_DIR`].
fn mount_config_fs() -> Result<()> {
    let base_path = CString::new(pins::CONFIG_DIR)?;
    let label = CString::new(pins::SPIFFS_PARTITION)?;
    let conf = esp_idf_svc::sys::esp_vfs_spiffs_conf_t {
        base_path: base_path.as_ptr(),
        partition_label: label.as_ptr(),
        max_files: 4,
        format_if_mount_failed: true,
    };
    // The VFS layer copies both strings during registration.
    esp_idf_svc::sys::esp!(unsafe { esp_idf_svc::sys::esp_vfs_spiffs_register(&conf) })
        .context("SPIFFS mount failed")?;
    Ok(())
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Onboard actuator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Storage ────────────────────────────────────────────
    let persistent = match mount_config_fs() {
        Ok(()) => true,
        Err(e) => {
            warn!("{:#}; running with in-memory configuration only", e);
            false
        }
    };
    let store = FileConfigStore::new(pins::CONFIG_DIR);

    // ── 3. Peripherals and ports ──────────────────────────────
    let peripherals = Peripherals::take()?;
    let pin = PinDriver::input_output(peripherals.pins.gpio15)?;
    let clock = SystemClock::new();
    let mut log_sink = LogEventSink::new();

    // ── 4. Registry ───────────────────────────────────────────
    let mut service = ActuatorService::new();
    service.register(
        pins::ONBOARD_ACTUATOR_ID,
        ActuatorConfig::default(),
        HalOutput::new(pin),
        clock.now_ms(),
        &mut log_sink,
    )?;
    if persistent {
        if let Err(e) = service.load_config(pins::ONBOARD_ACTUATOR_ID, &store, &mut log_sink) {
            warn!("Config load: {}", e);
        }
    }

    info!(
        "Actuator '{}' on GPIO{}. Entering control loop.",
        pins::ONBOARD_ACTUATOR_ID,
        pins::ONBOARD_ACTUATOR_GPIO
    );

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        // No sensor bus on this board: the document carries actuator
        // states only, so every engine runs its plain variant.
        let mut doc = SensorDocument::new();
        service.tick(&mut doc, &clock, &mut log_sink);
        debug!("report: {}", doc.to_json());

        FreeRtos::delay_ms(pins::CONTROL_LOOP_INTERVAL_MS);
    }
}
