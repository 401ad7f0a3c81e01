//! File-backed record store: one JSON table file per configured tab.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::ports::record_store::RecordStore;

/// On-disk shape of a table file: one header row plus data rows.
#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Record store persisted as a single JSON table file.
///
/// The file must exist before the store opens — a missing table is a
/// configuration error, not something to paper over at runtime (use
/// `tally init` to seed a fresh data directory). Rows are kept in
/// append order.
///
/// Mutations serialize behind an internal lock, and every save replaces
/// the file through a temp-file rename, so the lock-free read path
/// never observes a partial table.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileRecordStore {
    /// Opens the table file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or does not parse as
    /// a table.
    pub fn open(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err(format!(
                "table file {} not found; run `tally init` to create it",
                path.display()
            ));
        }
        let store = Self { path: path.to_path_buf(), write_lock: Mutex::new(()) };
        store
            .load()
            .map_err(|e| format!("table file {} is not readable: {e}", path.display()))?;
        Ok(store)
    }

    /// Creates the table file at `path` with the given header and no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or cannot be written.
    pub fn seed(path: &Path, header: Vec<String>) -> Result<Self, String> {
        if path.exists() {
            return Err(format!("table file {} already exists", path.display()));
        }
        let store = Self { path: path.to_path_buf(), write_lock: Mutex::new(()) };
        store
            .save(&TableFile { header, rows: Vec::new() })
            .map_err(|e| format!("failed to seed table file {}: {e}", path.display()))?;
        Ok(store)
    }

    fn load(&self) -> Result<TableFile, Box<dyn std::error::Error + Send + Sync>> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    // Write-then-rename keeps the table file complete at every instant.
    fn save(&self, table: &TableFile) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(table)?;
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn list_existing_ids(
        &self,
    ) -> Result<HashSet<String>, Box<dyn std::error::Error + Send + Sync>> {
        let table = self.load()?;
        Ok(table
            .rows
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
        let _guard = self.write_lock.lock().map_err(|_| "record store write lock poisoned")?;
        let mut table = self.load()?;
        table.rows.push(row);
        self.save(&table)
    }

    fn get_all_records(
        &self,
    ) -> Result<(Vec<String>, Vec<Vec<String>>), Box<dyn std::error::Error + Send + Sync>> {
        let table = self.load()?;
        Ok((table.header, table.rows))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn header() -> Vec<String> {
        vec!["id".to_string(), "student_id".to_string()]
    }

    #[test]
    fn open_fails_on_missing_file() {
        let dir = temp_dir("tally_table_missing");
        let err = FileRecordStore::open(&dir.join("incidents.json")).unwrap_err();
        assert!(err.contains("not found"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn seed_refuses_to_overwrite() {
        let dir = temp_dir("tally_table_overwrite");
        let path = dir.join("incidents.json");
        FileRecordStore::seed(&path, header()).unwrap();
        let err = FileRecordStore::seed(&path, header()).unwrap_err();
        assert!(err.contains("already exists"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn append_then_snapshot_round_trips() {
        let dir = temp_dir("tally_table_append");
        let path = dir.join("incidents.json");
        let store = FileRecordStore::seed(&path, header()).unwrap();
        store.append_record(vec!["AL0001".to_string(), "Alice".to_string()]).unwrap();
        store.append_record(vec!["BK0001".to_string(), "Ben".to_string()]).unwrap();

        let (head, rows) = FileRecordStore::open(&path).unwrap().get_all_records().unwrap();
        assert_eq!(head, header());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "AL0001");
        assert_eq!(rows[1][1], "Ben");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn existing_ids_skip_empty_id_cells() {
        let dir = temp_dir("tally_table_ids");
        let path = dir.join("incidents.json");
        let store = FileRecordStore::seed(&path, header()).unwrap();
        store.append_record(vec!["AL0001".to_string(), "Alice".to_string()]).unwrap();
        store.append_record(vec![String::new(), "draft".to_string()]).unwrap();

        let ids = store.list_existing_ids().unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("AL0001"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn concurrent_appends_all_survive() {
        let dir = temp_dir("tally_table_concurrent");
        let path = dir.join("incidents.json");
        let store = Arc::new(FileRecordStore::seed(&path, header()).unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.append_record(vec![format!("AL{i:04}"), "Alice".to_string()]).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let (_, rows) = store.get_all_records().unwrap();
        assert_eq!(rows.len(), 16);
        assert_eq!(store.list_existing_ids().unwrap().len(), 16);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn snapshots_stay_parseable_while_appends_are_in_flight() {
        let dir = temp_dir("tally_table_reader_race");
        let path = dir.join("incidents.json");
        let store = Arc::new(FileRecordStore::seed(&path, header()).unwrap());

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..50 {
                    store
                        .append_record(vec![format!("AL{i:04}"), "Alice".to_string()])
                        .unwrap();
                }
            })
        };

        // Unlocked reads must see a complete table at every instant.
        while !writer.is_finished() {
            let (head, rows) = store.get_all_records().unwrap();
            assert_eq!(head, header());
            assert!(rows.len() <= 50);
        }
        writer.join().unwrap();
        assert_eq!(store.get_all_records().unwrap().1.len(), 50);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
