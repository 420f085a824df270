//! Roundtrip serialisation tests for `cycletrack-core` snapshot types.
//!
//! Each `#[case]` is isolated — no shared state.

use chrono::Utc;
use cycletrack_core::store::{PresetSnapshot, TimerSnapshot};
use cycletrack_core::types::{MachineName, PresetId, PresetRecord, SlotId, TimerSlot};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn empty_snapshot() -> TimerSnapshot {
    TimerSnapshot {
        saved_at: Utc::now(),
        slots: vec![],
    }
}

fn default_board() -> TimerSnapshot {
    let slots = ["D1", "D2", "D3", "D4", "M10", "M14"]
        .iter()
        .enumerate()
        .map(|(i, name)| TimerSlot::zeroed(SlotId(i as u32), *name))
        .collect();
    TimerSnapshot {
        saved_at: Utc::now(),
        slots,
    }
}

fn mid_cycle_board() -> TimerSnapshot {
    TimerSnapshot {
        saved_at: Utc::now(),
        slots: vec![
            TimerSlot {
                id: SlotId(0),
                name: MachineName::from("D1"),
                initial_seconds: 3600,
                remaining_seconds: 1799,
                is_running: true,
            },
            TimerSlot {
                id: SlotId(1),
                name: MachineName::from("D2"),
                initial_seconds: 600,
                remaining_seconds: 0,
                is_running: false,
            },
        ],
    }
}

fn unicode_board() -> TimerSnapshot {
    TimerSnapshot {
        saved_at: Utc::now(),
        slots: vec![TimerSlot {
            id: SlotId(0),
            name: MachineName::from("旋盤-Ф1 <>&\"'"),
            initial_seconds: 42,
            remaining_seconds: 7,
            is_running: true,
        }],
    }
}

// ---------------------------------------------------------------------------
// Parameterised timer snapshot roundtrip
// ---------------------------------------------------------------------------

#[rstest]
#[case("empty", empty_snapshot())]
#[case("default_board", default_board())]
#[case("mid_cycle", mid_cycle_board())]
#[case("unicode_names", unicode_board())]
fn timer_snapshot_roundtrip(#[case] label: &str, #[case] snapshot: TimerSnapshot) {
    let json = serde_json::to_string(&snapshot)
        .unwrap_or_else(|e| panic!("[{label}] serialize failed: {e}"));
    let back: TimerSnapshot = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("[{label}] deserialize failed: {e}"));
    assert_eq!(snapshot.slots, back.slots, "[{label}] slots must be field-for-field equal");
}

#[rstest]
#[case("no_presets", vec![])]
#[case("several", vec![
    PresetRecord {
        id: PresetId::from("a-1"),
        machine_name: MachineName::from("D1"),
        part_number: "PN-104A".to_string(),
        runtime_seconds: 5400,
    },
    PresetRecord {
        id: PresetId::from("a-2"),
        machine_name: MachineName::from("M10"),
        part_number: "PN-7".to_string(),
        runtime_seconds: 90,
    },
])]
fn preset_snapshot_roundtrip(#[case] label: &str, #[case] presets: Vec<PresetRecord>) {
    let snapshot = PresetSnapshot {
        saved_at: Utc::now(),
        presets,
    };
    let json = serde_json::to_string(&snapshot)
        .unwrap_or_else(|e| panic!("[{label}] serialize failed: {e}"));
    let back: PresetSnapshot = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("[{label}] deserialize failed: {e}"));
    assert_eq!(snapshot.presets, back.presets, "[{label}] presets");
}

// ---------------------------------------------------------------------------
// Wire field names are load-bearing (snapshot compatibility)
// ---------------------------------------------------------------------------

#[test]
fn timer_wire_format_uses_camel_case_names() {
    let snapshot = mid_cycle_board();
    let value = serde_json::to_value(&snapshot).expect("serialize");
    let slot = &value["slots"][0];
    assert!(slot.get("id").is_some());
    assert!(slot.get("name").is_some());
    assert!(slot.get("initialSeconds").is_some());
    assert!(slot.get("remainingSeconds").is_some());
    assert!(slot.get("isRunning").is_some());
    assert!(slot.get("initial_seconds").is_none(), "snake_case must not leak");
}

#[test]
fn preset_wire_format_uses_camel_case_names() {
    let record = PresetRecord {
        id: PresetId::from("x"),
        machine_name: MachineName::from("D1"),
        part_number: "PN-1".to_string(),
        runtime_seconds: 60,
    };
    let value = serde_json::to_value(&record).expect("serialize");
    assert!(value.get("id").is_some());
    assert!(value.get("machineName").is_some());
    assert!(value.get("partNumber").is_some());
    assert!(value.get("runtimeSeconds").is_some());
}

#[test]
fn legacy_browser_export_still_parses() {
    // A slot record exactly as the previous dashboard persisted it.
    let raw = r#"{"id":4,"name":"M10","initialSeconds":5400,"remainingSeconds":912,"isRunning":true}"#;
    let slot: TimerSlot = serde_json::from_str(raw).expect("parse");
    assert_eq!(slot.id, SlotId(4));
    assert_eq!(slot.initial_seconds, 5400);
    assert_eq!(slot.remaining_seconds, 912);
    assert!(slot.is_running);
}
