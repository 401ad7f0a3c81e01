//! In-memory record store.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::ports::record_store::RecordStore;

/// Record store holding the table in a mutex-guarded `Vec` of rows.
pub struct MemoryRecordStore {
    header: Vec<String>,
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryRecordStore {
    /// Creates an empty table with the given header.
    #[must_use]
    pub fn new(header: Vec<String>) -> Self {
        Self { header, rows: Mutex::new(Vec::new()) }
    }
}

impl RecordStore for MemoryRecordStore {
    fn list_existing_ids(
        &self,
    ) -> Result<HashSet<String>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = self.rows.lock().map_err(|_| "record store mutex poisoned")?;
        Ok(rows
            .iter()
            .filter_map(|row| row.first())
            .filter(|id| !id.is_empty())
            .cloned()
            .collect())
    }

    fn append_record(
        &self,
        row: Vec<String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut rows = self.rows.lock().map_err(|_| "record store mutex poisoned")?;
        rows.push(row);
        Ok(())
    }

    fn get_all_records(
        &self,
    ) -> Result<(Vec<String>, Vec<Vec<String>>), Box<dyn std::error::Error + Send + Sync>> {
        let rows = self.rows.lock().map_err(|_| "record store mutex poisoned")?;
        Ok((self.header.clone(), rows.clone()))
    }
}
