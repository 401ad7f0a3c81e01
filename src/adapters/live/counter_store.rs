//! File-backed counter store: a JSON object mapping prefix to counter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::counter_store::CounterStore;

/// Counter store persisted as a single JSON file.
///
/// An absent file means no counter has ever been set; the file is
/// created on the first write. Each operation re-reads the file so that
/// counter state survives process restarts and is visible to the
/// `counter` CLI subcommands. Mutations serialize behind an internal
/// lock and land through a temp-file rename, so concurrent readers
/// never see a partial map.
pub struct FileCounterStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCounterStore {
    /// Creates a store persisting to the given file path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf(), write_lock: Mutex::new(()) }
    }

    fn load(&self) -> Result<BTreeMap<String, u32>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(
        &self,
        counters: &BTreeMap<String, u32>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(counters)?;
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl CounterStore for FileCounterStore {
    fn get(&self, prefix: &str) -> Result<Option<u32>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.load()?.get(prefix).copied())
    }

    fn put(
        &self,
        prefix: &str,
        value: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _guard = self.write_lock.lock().map_err(|_| "counter store write lock poisoned")?;
        let mut counters = self.load()?;
        counters.insert(prefix.to_string(), value);
        self.save(&counters)
    }

    fn clear(&self, prefix: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let _guard = self.write_lock.lock().map_err(|_| "counter store write lock poisoned")?;
        let mut counters = self.load()?;
        if counters.remove(prefix).is_some() {
            self.save(&counters)?;
        }
        Ok(())
    }
}
