//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial console,
//! upstream configuration push) that the
//! [`ActuatorService`](super::service::ActuatorService) interprets and
//! acts upon.

use crate::config::ConfigDocument;

use super::service::ActuatorId;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Merge a (possibly partial) configuration document into the live
    /// configuration and persist the result.
    UpdateConfig {
        id: ActuatorId,
        config: ConfigDocument,
    },

    /// Re-read the stored configuration document.
    ReloadConfig { id: ActuatorId },

    /// Persist the live configuration immediately.
    SaveConfig { id: ActuatorId },
}
