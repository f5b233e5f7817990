//! Fuzz target: evaluation against arbitrary sensor documents
//!
//! Parses arbitrary bytes as a sensor document and runs one engine per
//! control mode over it at every hour, verifying:
//! - No panics for any document shape or reading value
//! - At most one pin write per evaluation
//!
//! cargo fuzz run fuzz_sensor_document

#![no_main]

use actuator::config::{ActuatorConfig, SecondaryMode};
use actuator::drivers::output::SimOutput;
use actuator::engine::ActuatorEngine;
use actuator::sensors::SensorDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some(doc) = SensorDocument::from_json(text) else {
        return;
    };

    let modes = [
        (true, false, SecondaryMode::None),
        (true, true, SecondaryMode::None),
        (false, true, SecondaryMode::None),
        (true, true, SecondaryMode::Hour),
        (true, true, SecondaryMode::Minute),
        (true, true, SecondaryMode::HourMinute),
    ];
    for (enabled, temporal, secondary_mode) in modes {
        let cfg = ActuatorConfig {
            enabled,
            temporal,
            secondary_mode,
            primary_key: "Temperature".into(),
            range_low: 20.0,
            range_high: 30.0,
            duration_low: 10,
            duration_high: 10,
            hour_low: 22,
            hour_high: 6,
            minute_low: 10,
            minute_high: 50,
            ..Default::default()
        };
        let mut engine = ActuatorEngine::new(cfg, SimOutput::new(), 0);
        for hour in 0u8..24 {
            let before = engine.output().writes();
            engine.evaluate(&doc, hour, hour * 2, u64::from(hour) * 10);
            assert!(engine.output().writes() - before <= 1);
        }
    }
});
