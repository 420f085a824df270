//! Preset catalog — saved (machine, part number, runtime) records.
//!
//! Append-ordered; ids are UUID v4. Machine lookups are case-insensitive,
//! matching the registry's arm discipline.

use crate::error::CoreError;
use crate::types::{MachineName, PresetId, PresetRecord};

/// The catalog of saved presets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetCatalog {
    records: Vec<PresetRecord>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a catalog from previously snapshotted records.
    pub fn from_records(records: Vec<PresetRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PresetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new preset. Rejects a blank part number (after trimming) and
    /// a non-positive runtime; nothing is mutated on rejection. The part
    /// number is stored uppercased. Returns a copy of the new record.
    pub fn add(
        &mut self,
        machine: &str,
        part_number: &str,
        runtime_seconds: u32,
    ) -> Result<PresetRecord, CoreError> {
        let part = part_number.trim();
        if part.is_empty() {
            return Err(CoreError::Validation("part number is required".into()));
        }
        if runtime_seconds == 0 {
            return Err(CoreError::Validation(
                "runtime must be a positive number of seconds".into(),
            ));
        }

        let record = PresetRecord {
            id: PresetId::generate(),
            machine_name: MachineName::from(machine),
            part_number: part.to_ascii_uppercase(),
            runtime_seconds,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    /// Remove by id. Absent id is a no-op, not an error; returns whether a
    /// record was removed.
    pub fn remove(&mut self, id: &PresetId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        self.records.len() != before
    }

    /// All presets saved for `machine`, case-insensitive, insertion order.
    pub fn find_by_machine(&self, machine: &str) -> Vec<&PresetRecord> {
        self.records
            .iter()
            .filter(|record| record.machine_name.matches(machine))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_stores_uppercased_part_number() {
        let mut catalog = PresetCatalog::new();
        let record = catalog.add("D1", "pn-104a", 600).expect("add");
        assert_eq!(record.part_number, "PN-104A");
        assert_eq!(record.machine_name.0, "D1");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn blank_part_number_is_rejected() {
        let mut catalog = PresetCatalog::new();
        let err = catalog.add("D1", "   ", 100).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "got: {err}");
        assert!(catalog.is_empty(), "catalog must be unchanged on rejection");
    }

    #[test]
    fn zero_runtime_is_rejected() {
        let mut catalog = PresetCatalog::new();
        let err = catalog.add("D1", "pn-1", 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "got: {err}");
        assert!(catalog.is_empty());
    }

    #[test]
    fn remove_absent_id_is_a_noop() {
        let mut catalog = PresetCatalog::new();
        catalog.add("D1", "pn-1", 60).expect("add");
        assert!(!catalog.remove(&PresetId::from("missing")));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn remove_deletes_only_the_matching_record() {
        let mut catalog = PresetCatalog::new();
        let keep = catalog.add("D1", "pn-1", 60).expect("add").id;
        let gone = catalog.add("D2", "pn-2", 90).expect("add").id;
        assert!(catalog.remove(&gone));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].id, keep);
    }

    #[test]
    fn find_by_machine_is_case_insensitive_and_ordered() {
        let mut catalog = PresetCatalog::new();
        catalog.add("D1", "pn-1", 60).expect("add");
        catalog.add("M10", "pn-2", 90).expect("add");
        catalog.add("d1", "pn-3", 120).expect("add");

        let found = catalog.find_by_machine("D1");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].part_number, "PN-1");
        assert_eq!(found[1].part_number, "PN-3");
        assert!(catalog.find_by_machine("M14").is_empty());
    }
}
