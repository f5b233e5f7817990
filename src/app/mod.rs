//! Application core: actuator registry, commands and events.
//!
//! The service owns every [`ActuatorEngine`](crate::engine::ActuatorEngine)
//! and drives them once per control tick.  All interaction with pins,
//! clocks and storage happens through the **port traits** defined in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
