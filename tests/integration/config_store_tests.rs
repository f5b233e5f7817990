//! File-backed configuration store against a temporary directory.

use std::fs;

use actuator::adapters::store::FileConfigStore;
use actuator::app::ports::{ConfigError, ConfigPort};
use actuator::app::service::ActuatorService;
use actuator::config::{ActuatorConfig, ConfigDocument, SecondaryMode};

use crate::mock_hw::{FakeOutput, RecordingSink};

fn sample() -> ActuatorConfig {
    ActuatorConfig {
        enabled: true,
        temporal: true,
        inverted: false,
        primary_key: "Temperature".into(),
        secondary_mode: SecondaryMode::Hour,
        range_low: 20.0,
        range_high: 30.0,
        duration_low: 60_000,
        duration_high: 120_000,
        hour_low: 22,
        hour_high: 6,
        minute_low: 10,
        minute_high: 50,
    }
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path());
    assert_eq!(store.load("ActB"), Err(ConfigError::NotFound));
}

#[test]
fn save_then_load_reproduces_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path());

    store.save("ActB", &sample().to_document()).unwrap();
    let doc = store.load("ActB").unwrap();

    let mut restored = ActuatorConfig::default();
    restored.merge(&doc).unwrap();
    assert_eq!(restored, sample());
}

#[test]
fn garbage_file_is_corrupted() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path());
    fs::write(store.path("ActB"), b"\x00\x01garbage").unwrap();
    assert_eq!(store.load("ActB"), Err(ConfigError::Corrupted));
}

#[test]
fn missing_directory_is_io_error_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path().join("absent"));
    assert_eq!(
        store.save("ActB", &ConfigDocument::default()),
        Err(ConfigError::IoError)
    );
}

#[test]
fn first_boot_establishes_document_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path());
    let mut sink = RecordingSink::new();
    let mut svc = ActuatorService::new();
    svc.register("ActB", ActuatorConfig::default(), FakeOutput::new(), 0, &mut sink)
        .unwrap();

    svc.load_config("ActB", &store, &mut sink).unwrap();

    let text = fs::read_to_string(store.path("ActB")).unwrap();
    for key in ["\"enabled\"", "\"temporal\"", "\"inverted\"", "\"low\"", "\"high\"", "\"type\""] {
        assert!(text.contains(key), "{key} missing from {text}");
    }
}

#[test]
fn legacy_document_loads_through_service() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path());
    fs::write(
        store.path("ActB"),
        br#"{"actif":1,"temporal":1,"inverted":0,
            "low":[20.0,60000,22,10],"high":[30.0,120000,6,50],
            "type":["Temperature","hour"]}"#,
    )
    .unwrap();

    let mut sink = RecordingSink::new();
    let mut svc = ActuatorService::new();
    svc.register("ActB", ActuatorConfig::default(), FakeOutput::new(), 0, &mut sink)
        .unwrap();
    svc.load_config("ActB", &store, &mut sink).unwrap();

    assert_eq!(svc.engine("ActB").unwrap().config(), &sample());

    // Rewritten with the canonical key names.
    let text = fs::read_to_string(store.path("ActB")).unwrap();
    assert!(text.contains("\"enabled\":true"), "{text}");
    assert!(!text.contains("actif"), "{text}");
}
