//! Service context bundling all port trait objects.

use std::sync::Arc;

use crate::adapters::live::{FileCounterStore, FileRecordStore, LiveClock};
use crate::adapters::memory::{MemoryCounterStore, MemoryRecordStore};
use crate::config::{Config, StoreKind};
use crate::ports::clock::Clock;
use crate::ports::counter_store::CounterStore;
use crate::ports::record_store::RecordStore;
use crate::record;

/// Bundles the port trait objects behind the service workflows.
///
/// Constructors wire up different adapter implementations (file-backed
/// or in-memory) once at startup; everything downstream sees only the
/// traits. The ports are shared (`Arc`) so the service can hand store
/// calls to the blocking thread pool.
pub struct ServiceContext {
    /// Clock for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Persisted per-prefix sequence counters.
    pub counters: Arc<dyn CounterStore>,
    /// Tabular incident store.
    pub records: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

impl ServiceContext {
    /// Creates a context matching the configured backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file store is selected and the table
    /// file is missing or unreadable — a fatal configuration error,
    /// surfaced immediately rather than retried.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        match config.store {
            StoreKind::File => Self::live(config),
            StoreKind::Memory => Ok(Self::memory()),
        }
    }

    /// Creates a live context over the JSON files in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the table file cannot be opened.
    pub fn live(config: &Config) -> Result<Self, String> {
        let records = FileRecordStore::open(&config.table_path())?;
        Ok(Self {
            clock: Arc::new(LiveClock),
            counters: Arc::new(FileCounterStore::new(&config.counters_path())),
            records: Arc::new(records),
        })
    }

    /// Creates an in-memory context with an empty table.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            clock: Arc::new(LiveClock),
            counters: Arc::new(MemoryCounterStore::new()),
            records: Arc::new(MemoryRecordStore::new(record::header())),
        }
    }
}
