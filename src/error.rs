//! Unified error type for the actuator firmware.
//!
//! Port-level errors ([`ConfigError`], [`PinError`]) are defined next to
//! their traits in [`crate::app::ports`]; this enum wraps them together with
//! the registry errors so the entry point has a single type to report.

use core::fmt;

use crate::app::ports::{ConfigError, PinError};

/// Every fallible operation outside the engine funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration could not be loaded, parsed or persisted.
    Config(ConfigError),
    /// The output pin could not be driven or read.
    Pin(PinError),
    /// All actuator slots are taken.
    RegistryFull,
    /// An actuator with this id is already registered.
    DuplicateId,
    /// No actuator with this id is registered.
    UnknownActuator,
    /// Actuator ids are limited to [`crate::app::service::MAX_ID_LEN`] bytes.
    IdTooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Pin(e) => write!(f, "pin: {e}"),
            Self::RegistryFull => write!(f, "actuator registry full"),
            Self::DuplicateId => write!(f, "actuator id already registered"),
            Self::UnknownActuator => write!(f, "unknown actuator id"),
            Self::IdTooLong => write!(f, "actuator id too long"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
