//! Aggregate status classification.
//!
//! One lamp for the whole board: a single finished slot turns the system
//! indicator to alert even when every other slot is healthy. Recomputed on
//! every state change; no hysteresis at the threshold boundaries.

use crate::types::{SystemStatus, TimerSlot};

/// Remaining time at or below this is urgent (15 minutes).
pub const URGENT_THRESHOLD_SECS: u32 = 900;

/// Remaining time at or below this (and above urgent) is a warning (30 minutes).
pub const WARNING_THRESHOLD_SECS: u32 = 1800;

/// Classify the slot set, first predicate wins:
///
/// 1. any finished slot → [`SystemStatus::AlertCycleComplete`]
/// 2. any slot with `0 < remaining <= 900` → [`SystemStatus::Urgent`]
/// 3. any slot with `900 < remaining <= 1800` → [`SystemStatus::Warning`]
/// 4. any running slot, or any with `remaining > 1800` → [`SystemStatus::Optimal`]
/// 5. otherwise → [`SystemStatus::Standby`]
pub fn classify(slots: &[TimerSlot]) -> SystemStatus {
    let any_finished = slots.iter().any(TimerSlot::is_finished);
    let any_urgent = slots
        .iter()
        .any(|s| s.remaining_seconds > 0 && s.remaining_seconds <= URGENT_THRESHOLD_SECS);
    let any_warning = slots.iter().any(|s| {
        s.remaining_seconds > URGENT_THRESHOLD_SECS
            && s.remaining_seconds <= WARNING_THRESHOLD_SECS
    });
    let any_active = slots
        .iter()
        .any(|s| s.is_running || s.remaining_seconds > WARNING_THRESHOLD_SECS);

    if any_finished {
        SystemStatus::AlertCycleComplete
    } else if any_urgent {
        SystemStatus::Urgent
    } else if any_warning {
        SystemStatus::Warning
    } else if any_active {
        SystemStatus::Optimal
    } else {
        SystemStatus::Standby
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SlotId;

    fn slot(initial: u32, remaining: u32, running: bool) -> TimerSlot {
        TimerSlot {
            id: SlotId(0),
            name: "D1".into(),
            initial_seconds: initial,
            remaining_seconds: remaining,
            is_running: running,
        }
    }

    #[test]
    fn empty_and_unconfigured_sets_are_standby() {
        assert_eq!(classify(&[]), SystemStatus::Standby);
        assert_eq!(classify(&[slot(0, 0, false)]), SystemStatus::Standby);
    }

    #[test]
    fn finished_dominates_urgent() {
        let slots = [slot(60, 0, false), slot(3600, 120, true)];
        assert_eq!(classify(&slots), SystemStatus::AlertCycleComplete);
    }

    #[test]
    fn urgent_dominates_warning_and_optimal() {
        let slots = [slot(3600, 900, true), slot(7200, 1800, true), slot(7200, 7000, true)];
        assert_eq!(classify(&slots), SystemStatus::Urgent);
    }

    #[test]
    fn warning_between_thresholds() {
        assert_eq!(classify(&[slot(3600, 901, false)]), SystemStatus::Warning);
        assert_eq!(classify(&[slot(3600, 1800, false)]), SystemStatus::Warning);
    }

    #[test]
    fn optimal_when_running_or_long_remaining() {
        assert_eq!(classify(&[slot(7200, 1801, false)]), SystemStatus::Optimal);
        // Boundary: a paused slot exactly at the warning threshold is warning,
        // not optimal — recheck with a long-but-running slot.
        assert_eq!(classify(&[slot(7200, 5000, true)]), SystemStatus::Optimal);
    }
}
