//! End-to-end registry scenarios: configure → run → finish → classify, and
//! snapshot write-safety under the `~/.cycletrack/` layout.

use assert_fs::prelude::*;
use chrono::Utc;
use cycletrack_core::store::{self, SnapshotFallback, TimerSnapshot};
use cycletrack_core::types::{SlotId, SystemStatus};
use cycletrack_core::{classify, CoreError, PresetCatalog, TimerRegistry};
use predicates::prelude::predicate;
use std::fs;

fn board() -> TimerRegistry {
    TimerRegistry::with_names(["D1", "D2", "D3", "D4", "M10", "M14"])
}

// ---------------------------------------------------------------------------
// 1. Full cycle scenario
// ---------------------------------------------------------------------------

#[test]
fn five_second_cycle_runs_to_alert() {
    let mut registry = board();
    registry.configure(SlotId(0), "D1", 5).expect("configure");

    let slot = registry.get(SlotId(0)).expect("slot");
    assert_eq!(slot.remaining_seconds, 5);
    assert!(!slot.is_running);

    registry.start(SlotId(0)).expect("start");
    for _ in 0..5 {
        registry.tick();
    }

    let slot = registry.get(SlotId(0)).expect("slot");
    assert_eq!(slot.remaining_seconds, 0);
    assert!(!slot.is_running);
    assert_eq!(
        classify(registry.slots()),
        SystemStatus::AlertCycleComplete
    );
}

#[test]
fn arm_by_name_case_mismatch_still_arms() {
    let mut registry = board();
    assert_eq!(registry.arm_by_name("d1", 3600), 1);

    let slot = registry.get(SlotId(0)).expect("slot");
    assert_eq!(slot.initial_seconds, 3600);
    assert_eq!(slot.remaining_seconds, 3600);
    assert!(slot.is_running);
    assert_eq!(classify(registry.slots()), SystemStatus::Optimal);
}

#[test]
fn fresh_board_is_standby() {
    assert_eq!(classify(board().slots()), SystemStatus::Standby);
}

// ---------------------------------------------------------------------------
// 2. Preset validation scenarios
// ---------------------------------------------------------------------------

#[test]
fn preset_add_with_blank_part_rejected_and_catalog_unchanged() {
    let mut catalog = PresetCatalog::new();
    let err = catalog.add("D1", "", 100).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "got: {err}");
    assert_eq!(catalog.len(), 0);
}

#[test]
fn preset_add_with_zero_runtime_rejected() {
    let mut catalog = PresetCatalog::new();
    let err = catalog.add("D1", "pn-1", 0).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "got: {err}");
}

// ---------------------------------------------------------------------------
// 3. Snapshot write safety and session-start fallback
// ---------------------------------------------------------------------------

#[test]
fn mid_write_crash_leaves_original_intact() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let registry = board();
    let snapshot = TimerSnapshot {
        saved_at: Utc::now(),
        slots: registry.slots().to_vec(),
    };
    store::save_timers_at(home.path(), &snapshot).expect("save");

    let path = store::timers_path_at(home.path());
    let original_bytes = fs::read(&path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(&path).expect("read after crash");
    assert_eq!(original_bytes, current_bytes, "original must survive the crash");
    assert!(tmp.exists(), ".tmp orphan must exist (crash = no cleanup)");
}

#[test]
fn save_creates_data_dir_with_snapshot() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let snapshot = TimerSnapshot {
        saved_at: Utc::now(),
        slots: board().slots().to_vec(),
    };
    store::save_timers_at(home.path(), &snapshot).expect("save");
    home.child(".cycletrack/timers.json")
        .assert(predicate::path::exists());
}

#[test]
fn corrupt_snapshot_never_fails_session_start() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    fs::create_dir_all(store::data_root_at(home.path())).expect("mkdir");
    fs::write(store::timers_path_at(home.path()), b"{ broken").expect("write");
    fs::write(store::presets_path_at(home.path()), b"not even close").expect("write");

    let roster: Vec<String> = ["D1", "D2"].map(String::from).to_vec();
    let (registry, timer_fallback) = store::load_timers_or_default_at(home.path(), &roster);
    let (catalog, preset_fallback) = store::load_presets_or_default_at(home.path());

    assert!(matches!(timer_fallback, SnapshotFallback::Corrupt(_)));
    assert!(matches!(preset_fallback, SnapshotFallback::Corrupt(_)));
    assert_eq!(registry.len(), 2);
    assert!(catalog.is_empty());
}

#[test]
fn snapshot_survives_restart_with_same_roster() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let roster: Vec<String> = ["D1", "D2", "M10"].map(String::from).to_vec();

    let mut registry = TimerRegistry::with_names(&roster);
    registry.configure(SlotId(2), "M10", 1200).expect("configure");
    registry.start(SlotId(2)).expect("start");
    registry.tick();

    let snapshot = TimerSnapshot {
        saved_at: Utc::now(),
        slots: registry.slots().to_vec(),
    };
    store::save_timers_at(home.path(), &snapshot).expect("save");

    // "Reload the page": restore from disk.
    let (restored, fallback) = store::load_timers_or_default_at(home.path(), &roster);
    assert!(matches!(fallback, SnapshotFallback::None));
    let slot = restored.get(SlotId(2)).expect("slot");
    assert_eq!(slot.remaining_seconds, 1199);
    assert!(slot.is_running);
}
