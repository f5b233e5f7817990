//! GPIO pin assignments and fixed identifiers for the controller board.
//!
//! Single source of truth: `main` references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Onboard actuator (relay driver)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = relay energised.
pub const ONBOARD_ACTUATOR_GPIO: i32 = 15;
/// Id the onboard actuator's state is reported under.
pub const ONBOARD_ACTUATOR_ID: &str = "ActB";

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// SPIFFS VFS mount point holding one `<id>.json` per actuator.
pub const CONFIG_DIR: &str = "/spiffs";
/// SPIFFS partition label in the partition table.
pub const SPIFFS_PARTITION: &str = "spiffs";

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Control loop period.
pub const CONTROL_LOOP_INTERVAL_MS: u32 = 1_000;
