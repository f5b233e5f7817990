//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Registered { id, mode } => {
                info!("REG    | {} mode={}", id, mode);
            }
            AppEvent::OutputChanged { id, on } => {
                info!("OUTPUT | {} -> {}", id, if *on { "ON" } else { "OFF" });
            }
            AppEvent::FailsafeEngaged { id } => {
                warn!("FSAFE  | {} engaged", id);
            }
            AppEvent::FailsafeCleared { id } => {
                warn!("FSAFE  | {} cleared", id);
            }
            AppEvent::ConfigLoaded { id } => {
                info!("CONFIG | {} loaded", id);
            }
            AppEvent::ConfigDefaulted { id } => {
                info!("CONFIG | {} defaults written", id);
            }
            AppEvent::ConfigRejected { id, reason } => {
                warn!("CONFIG | {} rejected: {}", id, reason);
            }
            AppEvent::ModeChanged { id, from, to } => {
                info!("MODE   | {} {} -> {}", id, from, to);
            }
        }
    }
}
