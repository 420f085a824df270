//! Snapshot persistence for the timer registry and preset catalog.
//!
//! # Storage layout
//!
//! ```text
//! ~/.cycletrack/
//!   config.yaml    (machine roster — see `config`)
//!   timers.json    (timer snapshot — mode 0600)
//!   presets.json   (preset snapshot — mode 0600)
//! ```
//!
//! Writes use an atomic `.tmp` sibling + rename.
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::presets::PresetCatalog;
use crate::registry::TimerRegistry;
use crate::types::{PresetRecord, SlotId, TimerSlot};

pub const TIMER_SNAPSHOT_FILE: &str = "timers.json";
pub const PRESET_SNAPSHOT_FILE: &str = "presets.json";

/// On-disk timer snapshot payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub saved_at: DateTime<Utc>,
    pub slots: Vec<TimerSlot>,
}

/// On-disk preset snapshot payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSnapshot {
    pub saved_at: DateTime<Utc>,
    pub presets: Vec<PresetRecord>,
}

/// Why a load fell back to defaults (if it did).
#[derive(Debug)]
pub enum SnapshotFallback {
    /// Snapshot restored as-is.
    None,
    /// No snapshot on disk yet — first session.
    Missing,
    /// Snapshot unreadable; the parse/IO error is carried for logging.
    Corrupt(CoreError),
    /// Timer snapshot disagreed with the configured roster shape.
    RosterMismatch,
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.cycletrack/` — pure, no I/O.
pub fn data_root_at(home: &Path) -> PathBuf {
    home.join(".cycletrack")
}

pub fn timers_path_at(home: &Path) -> PathBuf {
    data_root_at(home).join(TIMER_SNAPSHOT_FILE)
}

pub fn presets_path_at(home: &Path) -> PathBuf {
    data_root_at(home).join(PRESET_SNAPSHOT_FILE)
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the timer snapshot.
///
/// Returns `CoreError::SnapshotNotFound` if absent,
/// `CoreError::Parse` (with path context) if malformed JSON.
pub fn load_timers_at(home: &Path) -> Result<TimerSnapshot, CoreError> {
    load_snapshot(timers_path_at(home))
}

/// `load_timers_at` convenience wrapper.
pub fn load_timers() -> Result<TimerSnapshot, CoreError> {
    load_timers_at(&home()?)
}

/// Load the preset snapshot.
pub fn load_presets_at(home: &Path) -> Result<PresetSnapshot, CoreError> {
    load_snapshot(presets_path_at(home))
}

/// `load_presets_at` convenience wrapper.
pub fn load_presets() -> Result<PresetSnapshot, CoreError> {
    load_presets_at(&home()?)
}

fn load_snapshot<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<T, CoreError> {
    if !path.exists() {
        return Err(CoreError::SnapshotNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_json::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
}

// ---------------------------------------------------------------------------
// 3. Load with fallback (session-start policy)
// ---------------------------------------------------------------------------

/// Restore the registry from the timer snapshot, falling back to a zeroed
/// roster-shaped registry when the snapshot is missing, unreadable, or its
/// slot shape (count or id sequence) disagrees with the roster. The roster
/// is authoritative for slot identity; session startup never fails here.
pub fn load_timers_or_default_at(
    home: &Path,
    roster: &[String],
) -> (TimerRegistry, SnapshotFallback) {
    match load_timers_at(home) {
        Ok(snapshot) => {
            let shape_ok = snapshot.slots.len() == roster.len()
                && snapshot
                    .slots
                    .iter()
                    .enumerate()
                    .all(|(i, slot)| slot.id == SlotId(i as u32));
            if shape_ok {
                (
                    TimerRegistry::from_slots(snapshot.slots),
                    SnapshotFallback::None,
                )
            } else {
                (
                    TimerRegistry::with_names(roster),
                    SnapshotFallback::RosterMismatch,
                )
            }
        }
        Err(CoreError::SnapshotNotFound { .. }) => {
            (TimerRegistry::with_names(roster), SnapshotFallback::Missing)
        }
        Err(err) => (
            TimerRegistry::with_names(roster),
            SnapshotFallback::Corrupt(err),
        ),
    }
}

/// Restore the preset catalog, falling back to an empty catalog when the
/// snapshot is missing or unreadable.
pub fn load_presets_or_default_at(home: &Path) -> (PresetCatalog, SnapshotFallback) {
    match load_presets_at(home) {
        Ok(snapshot) => (
            PresetCatalog::from_records(snapshot.presets),
            SnapshotFallback::None,
        ),
        Err(CoreError::SnapshotNotFound { .. }) => {
            (PresetCatalog::new(), SnapshotFallback::Missing)
        }
        Err(err) => (PresetCatalog::new(), SnapshotFallback::Corrupt(err)),
    }
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the timer snapshot.
///
/// Write flow: serialize → `.tmp` sibling → `chmod 0600` → `rename`.
/// The `.tmp` lives in the same directory as the target (same filesystem).
pub fn save_timers_at(home: &Path, snapshot: &TimerSnapshot) -> Result<(), CoreError> {
    save_snapshot(home, timers_path_at(home), snapshot)
}

/// `save_timers_at` convenience wrapper.
pub fn save_timers(snapshot: &TimerSnapshot) -> Result<(), CoreError> {
    save_timers_at(&home()?, snapshot)
}

/// Atomically save the preset snapshot.
pub fn save_presets_at(home: &Path, snapshot: &PresetSnapshot) -> Result<(), CoreError> {
    save_snapshot(home, presets_path_at(home), snapshot)
}

/// `save_presets_at` convenience wrapper.
pub fn save_presets(snapshot: &PresetSnapshot) -> Result<(), CoreError> {
    save_presets_at(&home()?, snapshot)
}

fn save_snapshot<T: Serialize>(home: &Path, path: PathBuf, payload: &T) -> Result<(), CoreError> {
    ensure_data_root(home)?;
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(payload)?;
    std::fs::write(&tmp, json)?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

fn ensure_data_root(home: &Path) -> Result<(), CoreError> {
    let dir = data_root_at(home);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

pub(crate) fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
