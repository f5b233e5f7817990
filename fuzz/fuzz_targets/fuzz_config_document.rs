//! Fuzz target: stored configuration documents
//!
//! Feeds arbitrary bytes through the same path a boot-time load takes and
//! verifies:
//! - No panics under arbitrary byte inputs
//! - A rejected document leaves the configuration untouched
//! - An accepted document always re-serializes and re-loads identically
//!
//! cargo fuzz run fuzz_config_document

#![no_main]

use actuator::config::{ActuatorConfig, ConfigDocument};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = ConfigDocument::from_slice(data) else {
        return;
    };

    let before = ActuatorConfig::default();
    let mut config = before.clone();
    if config.merge(&doc).is_err() {
        assert_eq!(config, before, "rejected document must not apply");
        return;
    }

    assert!(config.hour_low <= 23 && config.hour_high <= 23);
    assert!(config.minute_low <= 59 && config.minute_high <= 59);

    let bytes = config.to_document().to_vec().expect("serialize");
    let reloaded = ConfigDocument::from_slice(&bytes).expect("re-parse");
    let mut again = ActuatorConfig::default();
    again.merge(&reloaded).expect("re-merge");
    assert_eq!(again, config);
});
