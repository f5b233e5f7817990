//! Port traits: the hexagonal boundary between decision logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ActuatorService / ActuatorEngine
//! ```
//!
//! Driven adapters (output pins, clocks, config storage, event sinks)
//! implement these traits.  The engine and service consume them via
//! generics, so the decision core never touches hardware directly.

use crate::config::ConfigDocument;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// One digital output line.
pub trait OutputDriver {
    /// Drive the line high (`true`) or low (`false`).
    fn set_pin(&mut self, high: bool) -> Result<(), PinError>;

    /// Read back the level the line is currently driven to.
    fn read_pin(&mut self) -> Result<bool, PinError>;
}

impl<T: OutputDriver + ?Sized> OutputDriver for Box<T> {
    fn set_pin(&mut self, high: bool) -> Result<(), PinError> {
        (**self).set_pin(high)
    }

    fn read_pin(&mut self) -> Result<bool, PinError> {
        (**self).read_pin()
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// 0–23.
    pub hour: u8,
    /// 0–59.
    pub minute: u8,
}

/// Monotonic and wall-clock time source.
pub trait Clock {
    /// Milliseconds since boot. Never decreases.
    fn now_ms(&self) -> u64;

    /// Current time of day, or `None` while the wall clock is not synced.
    fn wall_time(&self) -> Option<WallTime>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists one configuration document per actuator id.
pub trait ConfigPort {
    /// Load the stored document for `id`.
    ///
    /// Returns [`ConfigError::NotFound`] when nothing is stored yet and
    /// [`ConfigError::Corrupted`] when the stored bytes do not parse.
    fn load(&self, id: &str) -> Result<ConfigDocument, ConfigError>;

    /// Persist `doc` for `id`, replacing whatever was stored.
    fn save(&self, id: &str, doc: &ConfigDocument) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`OutputDriver`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    WriteFailed,
    ReadFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for PinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "GPIO write failed"),
            Self::ReadFailed => write!(f, "GPIO read failed"),
        }
    }
}
