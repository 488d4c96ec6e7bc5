//! Record log storage with per-serial indexing.
//!
//! Records are append-only: once written they are never modified or
//! deleted, and binding removal does not touch them. A secondary index
//! maps each serial number to the ids of its records so per-serial
//! queries avoid scanning the full log.

use std::collections::HashMap;

use comptrack_types::{ComputerRecord, RecordId, SerialNumber};

/// Append-only record log with a per-serial secondary index.
///
/// Record ids are insertion indices into the log, so iteration over
/// [`all`](RecordStore::all) and the ids in the index are both in
/// creation order.
///
/// Not synchronized itself — [`Registry`](crate::Registry) serializes
/// access through its write lock.
#[derive(Debug, Default)]
pub struct RecordStore {
    log: Vec<ComputerRecord>,
    by_serial: HashMap<SerialNumber, Vec<RecordId>>,
}

impl RecordStore {
    /// Creates an empty record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its id.
    pub fn append(&mut self, record: ComputerRecord) -> RecordId {
        let id = RecordId::new(self.log.len() as u64);
        self.by_serial.entry(record.serial_number.clone()).or_default().push(id);
        self.log.push(record);
        id
    }

    /// Returns a record by id, if it exists.
    pub fn get(&self, id: RecordId) -> Option<&ComputerRecord> {
        self.log.get(id.value() as usize)
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[ComputerRecord] {
        &self.log
    }

    /// Records for one serial number, in insertion order.
    pub fn for_serial<'a>(
        &'a self,
        serial: &SerialNumber,
    ) -> impl Iterator<Item = &'a ComputerRecord> {
        self.by_serial
            .get(serial)
            .into_iter()
            .flatten()
            .filter_map(|id| self.log.get(id.value() as usize))
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
