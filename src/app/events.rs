//! Outbound application events.
//!
//! The [`ActuatorService`](super::service::ActuatorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: log to serial, forward
//! upstream, etc.

use crate::control::Mode;

use super::ports::ConfigError;
use super::service::ActuatorId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// An actuator was added to the registry.
    Registered { id: ActuatorId, mode: Mode },

    /// An actuator's commanded output level changed.
    OutputChanged { id: ActuatorId, on: bool },

    /// The mixed-hour failsafe latch engaged (reading at or above the band).
    FailsafeEngaged { id: ActuatorId },

    /// The failsafe latch cleared (reading at or below the band).
    FailsafeCleared { id: ActuatorId },

    /// A stored configuration was merged and written back.
    ConfigLoaded { id: ActuatorId },

    /// No stored configuration; in-memory values were written as defaults.
    ConfigDefaulted { id: ActuatorId },

    /// A stored or submitted configuration was refused.
    ConfigRejected { id: ActuatorId, reason: ConfigError },

    /// A configuration change selected a different control mode.
    ModeChanged { id: ActuatorId, from: Mode, to: Mode },
}
