//! The fixed-slot timer registry.
//!
//! The registry is built once from the machine roster and never grows or
//! shrinks; slots are only reconfigured. Every operation is total over valid
//! slot ids — an unknown id is a caller error and surfaces as
//! [`CoreError::SlotNotFound`] rather than a silent no-op.

use crate::error::CoreError;
use crate::types::{MachineName, SlotId, TimerSlot};

/// Fixed collection of named countdown slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRegistry {
    slots: Vec<TimerSlot>,
}

impl TimerRegistry {
    /// Build a zeroed registry from the roster, ids assigned by position.
    /// Names are stored uppercased, matching the configure discipline.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                TimerSlot::zeroed(SlotId(i as u32), name.as_ref().to_ascii_uppercase())
            })
            .collect();
        Self { slots }
    }

    /// Restore a registry from previously snapshotted slots.
    pub fn from_slots(slots: Vec<TimerSlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[TimerSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: SlotId) -> Result<&TimerSlot, CoreError> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .ok_or(CoreError::SlotNotFound { id })
    }

    fn slot_mut(&mut self, id: SlotId) -> Result<&mut TimerSlot, CoreError> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or(CoreError::SlotNotFound { id })
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Set name and duration; remaining is reloaded with the duration and the
    /// slot is stopped. Names are trimmed and uppercased on the way in.
    pub fn configure(
        &mut self,
        id: SlotId,
        name: &str,
        duration_seconds: u32,
    ) -> Result<(), CoreError> {
        let slot = self.slot_mut(id)?;
        slot.name = MachineName(name.trim().to_ascii_uppercase());
        slot.initial_seconds = duration_seconds;
        slot.remaining_seconds = duration_seconds;
        slot.is_running = false;
        Ok(())
    }

    /// Start the countdown. Refused for an unconfigured or finished slot.
    pub fn start(&mut self, id: SlotId) -> Result<(), CoreError> {
        let slot = self.slot_mut(id)?;
        if slot.initial_seconds == 0 || slot.is_finished() {
            return Err(CoreError::NotStartable { id });
        }
        slot.is_running = true;
        Ok(())
    }

    /// Pause the countdown. Always succeeds for a valid id.
    pub fn stop(&mut self, id: SlotId) -> Result<(), CoreError> {
        self.slot_mut(id)?.is_running = false;
        Ok(())
    }

    /// Flip the running flag; returns the new state.
    pub fn toggle(&mut self, id: SlotId) -> Result<bool, CoreError> {
        if self.get(id)?.is_running {
            self.stop(id)?;
            Ok(false)
        } else {
            self.start(id)?;
            Ok(true)
        }
    }

    /// Full clear: stopped, zero remaining, zero configured.
    pub fn reset(&mut self, id: SlotId) -> Result<(), CoreError> {
        let slot = self.slot_mut(id)?;
        slot.is_running = false;
        slot.remaining_seconds = 0;
        slot.initial_seconds = 0;
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for slot in &mut self.slots {
            slot.is_running = false;
            slot.remaining_seconds = 0;
            slot.initial_seconds = 0;
        }
    }

    /// One-second decrement over the whole slot set. A running slot already
    /// at zero is stopped — idempotent floor, guards against restored state
    /// that never saw the decrement-to-zero transition.
    ///
    /// Returns `true` if any slot changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for slot in &mut self.slots {
            if slot.is_running && slot.remaining_seconds > 0 {
                slot.remaining_seconds -= 1;
                if slot.remaining_seconds == 0 {
                    slot.is_running = false;
                }
                changed = true;
            } else if slot.is_running {
                slot.is_running = false;
                changed = true;
            }
        }
        changed
    }

    /// Arm every slot whose name matches `machine` (case-insensitive):
    /// configured and remaining set to `duration_seconds`, running.
    ///
    /// Returns the number of slots armed; zero matches is a no-op, never an
    /// error. Precondition owned by the dispatch layer: `duration_seconds > 0`.
    pub fn arm_by_name(&mut self, machine: &str, duration_seconds: u32) -> usize {
        let mut armed = 0;
        for slot in &mut self.slots {
            if slot.name.matches(machine) {
                slot.initial_seconds = duration_seconds;
                slot.remaining_seconds = duration_seconds;
                slot.is_running = true;
                armed += 1;
            }
        }
        armed
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
