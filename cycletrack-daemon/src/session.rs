//! The timer session — sole owner of the registry and preset catalog.
//!
//! All mutations funnel through [`Session::apply`] on one logical thread of
//! control (the session task), so no operation ever interleaves with the
//! clock tick mid-mutation. Every mutation snapshots the affected collection;
//! a failed write drops the session to memory-only instead of failing the
//! caller's operation.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use serde_json::{json, Value};

use cycletrack_core::store::{self, PresetSnapshot, SnapshotFallback, TimerSnapshot};
use cycletrack_core::types::{PresetId, SlotId};
use cycletrack_core::{classify, config, CoreError, PresetCatalog, TimerRegistry};

use crate::error::DaemonError;
use crate::protocol::{DaemonRequest, SlotRow, StatusPayload};

pub struct Session {
    home: PathBuf,
    registry: TimerRegistry,
    catalog: PresetCatalog,
    /// Cleared after the first failed snapshot write; the session then runs
    /// memory-only for the rest of its life.
    persist: bool,
    started_at_unix: u64,
}

impl Session {
    /// Construct the session from config + snapshots. Missing or corrupt
    /// snapshots fall back to a zeroed board / empty catalog — startup never
    /// fails on snapshot state, only on an unreadable config.
    pub fn bootstrap_at(home: &Path) -> Result<Self, DaemonError> {
        let config = config::load_config_at(home)?;

        let (registry, timer_fallback) =
            store::load_timers_or_default_at(home, &config.machines);
        log_fallback("timers", &timer_fallback);
        let (catalog, preset_fallback) = store::load_presets_or_default_at(home);
        log_fallback("presets", &preset_fallback);

        tracing::info!(
            slots = registry.len(),
            presets = catalog.len(),
            "session bootstrapped"
        );

        Ok(Self {
            home: home.to_path_buf(),
            registry,
            catalog,
            persist: true,
            started_at_unix: unix_seconds_now(),
        })
    }

    /// Apply one command and return its response payload.
    ///
    /// `Shutdown` is not a session concern — the runtime intercepts it before
    /// the command reaches the session channel.
    pub fn apply(&mut self, request: DaemonRequest) -> Result<Value, DaemonError> {
        match request {
            DaemonRequest::Status => Ok(serde_json::to_value(self.status_payload())?),
            DaemonRequest::Configure { slot, name, seconds } => {
                self.registry.configure(SlotId(slot), &name, seconds)?;
                self.persist_timers();
                Ok(json!({ "slot": slot }))
            }
            DaemonRequest::Toggle { slot } => {
                let running = self.registry.toggle(SlotId(slot))?;
                self.persist_timers();
                Ok(json!({ "slot": slot, "running": running }))
            }
            DaemonRequest::Start { slot } => {
                self.registry.start(SlotId(slot))?;
                self.persist_timers();
                Ok(json!({ "slot": slot, "running": true }))
            }
            DaemonRequest::Stop { slot } => {
                self.registry.stop(SlotId(slot))?;
                self.persist_timers();
                Ok(json!({ "slot": slot, "running": false }))
            }
            DaemonRequest::Reset { slot } => {
                self.registry.reset(SlotId(slot))?;
                self.persist_timers();
                Ok(json!({ "slot": slot }))
            }
            DaemonRequest::ResetAll => {
                self.registry.reset_all();
                self.persist_timers();
                Ok(json!({ "slots": self.registry.len() }))
            }
            DaemonRequest::Dispatch { machine, seconds } => {
                if seconds == 0 {
                    return Err(CoreError::Validation(
                        "dispatch runtime must be a positive number of seconds".into(),
                    )
                    .into());
                }
                let armed = self.registry.arm_by_name(&machine, seconds);
                if armed > 0 {
                    self.persist_timers();
                } else {
                    tracing::warn!(machine = %machine, "dispatch matched no slot");
                }
                Ok(json!({ "machine": machine, "armed": armed }))
            }
            DaemonRequest::PresetAdd { machine, part, seconds } => {
                let record = self.catalog.add(&machine, &part, seconds)?;
                self.persist_presets();
                Ok(serde_json::to_value(record)?)
            }
            DaemonRequest::PresetRemove { id } => {
                let removed = self.catalog.remove(&PresetId(id.clone()));
                if removed {
                    self.persist_presets();
                }
                Ok(json!({ "id": id, "removed": removed }))
            }
            DaemonRequest::PresetList { machine } => {
                let records: Vec<_> = match machine {
                    Some(machine) => self.catalog.find_by_machine(&machine),
                    None => self.catalog.records().iter().collect(),
                };
                Ok(serde_json::to_value(records)?)
            }
            DaemonRequest::Shutdown => Ok(json!({ "stopping": true })),
        }
    }

    /// Advance the countdown clock by one second; snapshots only when a slot
    /// actually changed.
    pub fn tick(&mut self) {
        if self.registry.tick() {
            self.persist_timers();
        }
    }

    pub fn status_payload(&self) -> StatusPayload {
        let system_status = classify(self.registry.slots());
        StatusPayload {
            system_status,
            status_label: system_status.label().to_string(),
            started_at_unix: self.started_at_unix,
            persist: self.persist,
            preset_count: self.catalog.len(),
            slots: self
                .registry
                .slots()
                .iter()
                .map(|slot| SlotRow {
                    id: slot.id.0,
                    name: slot.name.0.clone(),
                    initial_seconds: slot.initial_seconds,
                    remaining_seconds: slot.remaining_seconds,
                    is_running: slot.is_running,
                    condition: slot.condition(),
                })
                .collect(),
        }
    }

    fn persist_timers(&mut self) {
        if !self.persist {
            return;
        }
        let snapshot = TimerSnapshot {
            saved_at: Utc::now(),
            slots: self.registry.slots().to_vec(),
        };
        if let Err(err) = store::save_timers_at(&self.home, &snapshot) {
            tracing::error!(error = %err, "timer snapshot write failed; continuing memory-only");
            self.persist = false;
        }
    }

    fn persist_presets(&mut self) {
        if !self.persist {
            return;
        }
        let snapshot = PresetSnapshot {
            saved_at: Utc::now(),
            presets: self.catalog.records().to_vec(),
        };
        if let Err(err) = store::save_presets_at(&self.home, &snapshot) {
            tracing::error!(error = %err, "preset snapshot write failed; continuing memory-only");
            self.persist = false;
        }
    }
}

fn log_fallback(snapshot: &str, fallback: &SnapshotFallback) {
    match fallback {
        SnapshotFallback::None => {}
        SnapshotFallback::Missing => {
            tracing::info!(snapshot, "no snapshot on disk; starting from defaults");
        }
        SnapshotFallback::Corrupt(err) => {
            tracing::warn!(snapshot, error = %err, "snapshot unreadable; starting from defaults");
        }
        SnapshotFallback::RosterMismatch => {
            tracing::warn!(snapshot, "snapshot shape disagrees with roster; starting from defaults");
        }
    }
}

fn unix_seconds_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
