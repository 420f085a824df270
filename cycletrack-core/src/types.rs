//! Domain types for the cycletrack dashboard.
//!
//! Snapshot-facing structs serialize with camelCase field names so the
//! on-disk JSON matches the established wire format
//! (`initialSeconds`, `remainingSeconds`, `isRunning`, …).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{URGENT_THRESHOLD_SECS, WARNING_THRESHOLD_SECS};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed timer slot id — the slot's fixed position in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for SlotId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// A strongly-typed machine label (e.g. "D1", "M10").
///
/// Matching is ASCII case-insensitive everywhere — see [`MachineName::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineName(pub String);

impl MachineName {
    /// Case-insensitive comparison against a raw label.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MachineName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MachineName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed preset id (UUID v4 string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetId(pub String);

impl PresetId {
    /// Generate a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PresetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PresetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Per-slot display classification derived from remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCondition {
    /// Remaining hit zero after a positive configuration — unacknowledged.
    Finished,
    /// 15 minutes or less remaining.
    Urgent,
    /// Between 15 and 30 minutes remaining.
    Warning,
    /// More than 30 minutes remaining.
    Safe,
    /// Zeroed and unconfigured.
    Idle,
}

/// Aggregate status over the whole slot set — one lamp for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    AlertCycleComplete,
    Urgent,
    Warning,
    Optimal,
    Standby,
}

impl SystemStatus {
    /// The dashboard label string for this status.
    pub fn label(self) -> &'static str {
        match self {
            SystemStatus::AlertCycleComplete => "ALERT: CYCLE COMPLETE",
            SystemStatus::Urgent => "STATUS: URGENT ATTENTION",
            SystemStatus::Warning => "STATUS: NEAR COMPLETION",
            SystemStatus::Optimal => "SYSTEM: OPTIMAL",
            SystemStatus::Standby => "SYSTEM: STANDBY",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One fixed timer channel: stable id, mutable label, countdown state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSlot {
    pub id: SlotId,
    pub name: MachineName,
    /// Duration last configured for this slot; 0 = never configured / cleared.
    pub initial_seconds: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
}

impl TimerSlot {
    /// A fresh, unconfigured slot.
    pub fn zeroed(id: SlotId, name: impl Into<MachineName>) -> Self {
        Self {
            id,
            name: name.into(),
            initial_seconds: 0,
            remaining_seconds: 0,
            is_running: false,
        }
    }

    /// Finished = remaining hit zero after a positive configuration.
    pub fn is_finished(&self) -> bool {
        self.remaining_seconds == 0 && self.initial_seconds > 0
    }

    /// Per-slot display condition.
    pub fn condition(&self) -> SlotCondition {
        if self.is_finished() {
            SlotCondition::Finished
        } else if self.remaining_seconds > 0 && self.remaining_seconds <= URGENT_THRESHOLD_SECS {
            SlotCondition::Urgent
        } else if self.remaining_seconds <= WARNING_THRESHOLD_SECS && self.remaining_seconds > 0 {
            SlotCondition::Warning
        } else if self.remaining_seconds > WARNING_THRESHOLD_SECS {
            SlotCondition::Safe
        } else {
            SlotCondition::Idle
        }
    }
}

/// A saved (machine, part, duration) triple usable to arm a slot quickly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord {
    pub id: PresetId,
    /// Loose reference to a slot by name — never validated against the
    /// roster; dangling references simply never match.
    pub machine_name: MachineName,
    /// Stored uppercased.
    pub part_number: String,
    pub runtime_seconds: u32,
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Zero-padded `HH:MM:SS` rendering of a second count.
pub fn format_hms(total_seconds: u32) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
