//! Application service: the hexagonal core.
//!
//! [`ActuatorService`] owns a fixed-capacity registry of
//! [`ActuatorEngine`]s keyed by actuator id.  It exposes a clean,
//! hardware-agnostic API.  Clocks, storage and event sinks are injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   Clock ──────▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     ActuatorService     │
//! ConfigPort ◀──▶ │  id → ActuatorEngine    │ ──▶ OutputDriver (per engine)
//!                 └────────────────────────┘
//! ```

use log::{debug, error, info, warn};

use crate::config::ActuatorConfig;
use crate::control::Mode;
use crate::control::failsafe::LatchChange;
use crate::engine::ActuatorEngine;
use crate::error::{Error, Result};
use crate::sensors::SensorDocument;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Clock, ConfigError, ConfigPort, EventSink, OutputDriver};

/// Registry capacity.
pub const MAX_ACTUATORS: usize = 8;
/// Longest accepted actuator id, in bytes.
pub const MAX_ID_LEN: usize = 16;

/// Actuator id, e.g. `"ActB"`.  Also the key its pin state is reported under.
pub type ActuatorId = heapless::String<MAX_ID_LEN>;

/// Validate and copy an id into fixed-capacity storage.
pub fn actuator_id(id: &str) -> Result<ActuatorId> {
    ActuatorId::try_from(id).map_err(|()| Error::IdTooLong)
}

/// Answer to an external status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorStatus {
    pub id: ActuatorId,
    pub mode: Mode,
    pub enabled: bool,
    /// Live pin level (read back).
    pub on: bool,
    pub failsafe_engaged: bool,
}

struct Slot<O> {
    id: ActuatorId,
    engine: ActuatorEngine<O>,
}

// ───────────────────────────────────────────────────────────────
// ActuatorService
// ───────────────────────────────────────────────────────────────

/// Owns every actuator engine and runs the control tick over them.
pub struct ActuatorService<O> {
    slots: heapless::Vec<Slot<O>, MAX_ACTUATORS>,
    tick_count: u64,
}

impl<O: OutputDriver> Default for ActuatorService<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: OutputDriver> ActuatorService<O> {
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
            tick_count: 0,
        }
    }

    // ── Registry ──────────────────────────────────────────────

    /// Add an actuator.  The engine drives its line low immediately; a
    /// failed initial write is logged and the actuator is still registered.
    pub fn register(
        &mut self,
        id: &str,
        config: ActuatorConfig,
        output: O,
        now_ms: u64,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let id = actuator_id(id)?;
        if self.position(&id).is_some() {
            return Err(Error::DuplicateId);
        }
        if self.slots.is_full() {
            return Err(Error::RegistryFull);
        }

        let mut engine = ActuatorEngine::new(config, output, now_ms);
        if let Err(e) = engine.begin() {
            warn!("Actuator '{}': initial low write failed: {}", id, e);
        }
        let mode = engine.mode();
        if self.slots.push(Slot { id: id.clone(), engine }).is_err() {
            return Err(Error::RegistryFull);
        }

        info!("Actuator '{}' registered in {} mode", id, mode);
        sink.emit(&AppEvent::Registered { id, mode });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.id.as_str())
    }

    pub fn engine(&self, id: &str) -> Option<&ActuatorEngine<O>> {
        self.slots.iter().find(|s| s.id.as_str() == id).map(|s| &s.engine)
    }

    pub fn engine_mut(&mut self, id: &str) -> Option<&mut ActuatorEngine<O>> {
        self.slots
            .iter_mut()
            .find(|s| s.id.as_str() == id)
            .map(|s| &mut s.engine)
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle over every actuator.
    ///
    /// The clock is read once.  Each engine evaluates against `doc`, then
    /// its read-back pin level is written into `doc` under its id.
    /// Schedule modes are skipped while the wall clock is unsynced; their
    /// pins are still reported.
    pub fn tick(&mut self, doc: &mut SensorDocument, clock: &impl Clock, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let now_ms = clock.now_ms();
        let wall = clock.wall_time();

        for slot in &mut self.slots {
            let mode = slot.engine.mode();
            let pin = match wall {
                None if mode.needs_wall_clock() => {
                    debug!(
                        "Actuator '{}': wall clock unsynced, skipping {} schedule",
                        slot.id, mode
                    );
                    slot.engine.read_pin()
                }
                _ => {
                    let (hour, minute) = wall.map_or((0, 0), |w| (w.hour, w.minute));
                    let outcome = slot.engine.evaluate(doc, hour, minute, now_ms);

                    match outcome.failsafe {
                        Some(LatchChange::Engaged) => sink.emit(&AppEvent::FailsafeEngaged {
                            id: slot.id.clone(),
                        }),
                        Some(LatchChange::Cleared) => sink.emit(&AppEvent::FailsafeCleared {
                            id: slot.id.clone(),
                        }),
                        None => {}
                    }
                    if let (true, Some(on)) = (outcome.changed, outcome.written) {
                        sink.emit(&AppEvent::OutputChanged {
                            id: slot.id.clone(),
                            on,
                        });
                    }
                    if outcome.mode != slot.engine.mode() {
                        sink.emit(&AppEvent::ModeChanged {
                            id: slot.id.clone(),
                            from: outcome.mode,
                            to: slot.engine.mode(),
                        });
                    }
                    outcome.pin
                }
            };
            doc.set_output(&slot.id, pin);
        }
    }

    // ── Configuration ─────────────────────────────────────────

    /// Load and merge the stored configuration for `id`.
    ///
    /// * stored document found and valid → merged, then the full document
    ///   is written back;
    /// * nothing stored → in-memory values kept and written as defaults;
    /// * corrupted or invalid → in-memory values kept, storage untouched.
    pub fn load_config(
        &mut self,
        id: &str,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let idx = self.position(id).ok_or(Error::UnknownActuator)?;

        match store.load(id) {
            Ok(doc) => {
                let mut config = self.slots[idx].engine.config().clone();
                if let Err(e) = config.merge(&doc) {
                    return Err(self.reject(idx, e, sink));
                }
                self.apply_config(idx, config, sink);
                self.persist(idx, store)?;
                info!("Actuator '{}' configuration loaded", id);
                self.slots[idx].engine.config().log_summary(id);
                sink.emit(&AppEvent::ConfigLoaded {
                    id: self.slots[idx].id.clone(),
                });
                Ok(())
            }
            Err(ConfigError::NotFound) => {
                warn!("Actuator '{}': no stored configuration, writing defaults", id);
                self.persist(idx, store)?;
                sink.emit(&AppEvent::ConfigDefaulted {
                    id: self.slots[idx].id.clone(),
                });
                Ok(())
            }
            Err(e) => Err(self.reject(idx, e, sink)),
        }
    }

    /// Persist the live configuration for `id`.
    pub fn save_config(&self, id: &str, store: &impl ConfigPort) -> Result<()> {
        let idx = self.position(id).ok_or(Error::UnknownActuator)?;
        self.persist(idx, store)?;
        info!("Actuator '{}' configuration saved", id);
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        store: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::UpdateConfig { id, config: doc } => {
                let idx = self.position(&id).ok_or(Error::UnknownActuator)?;
                let mut config = self.slots[idx].engine.config().clone();
                if let Err(e) = config.merge(&doc) {
                    return Err(self.reject(idx, e, sink));
                }
                self.apply_config(idx, config, sink);
                info!("Actuator '{}' configuration updated at runtime", id);
                self.persist(idx, store)
            }
            AppCommand::ReloadConfig { id } => self.load_config(&id, store, sink),
            AppCommand::SaveConfig { id } => self.save_config(&id, store),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Live status of one actuator.  Reads the pin back.
    pub fn status(&mut self, id: &str) -> Option<ActuatorStatus> {
        let slot = self.slots.iter_mut().find(|s| s.id.as_str() == id)?;
        Some(ActuatorStatus {
            id: slot.id.clone(),
            mode: slot.engine.mode(),
            enabled: slot.engine.config().enabled,
            on: slot.engine.read_pin(),
            failsafe_engaged: slot.engine.failsafe_engaged(),
        })
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn position(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.id.as_str() == id)
    }

    fn apply_config(&mut self, idx: usize, config: ActuatorConfig, sink: &mut impl EventSink) {
        let slot = &mut self.slots[idx];
        if let Some((from, to)) = slot.engine.set_config(config) {
            info!("Actuator '{}' mode {} -> {}", slot.id, from, to);
            sink.emit(&AppEvent::ModeChanged {
                id: slot.id.clone(),
                from,
                to,
            });
        }
    }

    fn persist(&self, idx: usize, store: &impl ConfigPort) -> Result<()> {
        let slot = &self.slots[idx];
        store
            .save(&slot.id, &slot.engine.config().to_document())
            .map_err(|e| {
                error!("Actuator '{}': config save failed: {}", slot.id, e);
                Error::Config(e)
            })
    }

    fn reject(&self, idx: usize, reason: ConfigError, sink: &mut impl EventSink) -> Error {
        let id = &self.slots[idx].id;
        warn!(
            "Actuator '{}': configuration rejected ({}), keeping current values",
            id, reason
        );
        sink.emit(&AppEvent::ConfigRejected {
            id: id.clone(),
            reason: reason.clone(),
        });
        Error::Config(reason)
    }
}
