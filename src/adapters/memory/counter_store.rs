//! In-memory counter store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::counter_store::CounterStore;

/// Counter store holding the prefix map in a mutex-guarded `HashMap`.
///
/// State lives only as long as the process; used by tests and
/// `TALLY_STORE=memory` runs where persistence across restarts does not
/// matter.
#[derive(Default)]
pub struct MemoryCounterStore {
    inner: Mutex<HashMap<String, u32>>,
}

impl MemoryCounterStore {
    /// Creates an empty counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn get(&self, prefix: &str) -> Result<Option<u32>, Box<dyn std::error::Error + Send + Sync>> {
        let inner = self.inner.lock().map_err(|_| "counter store mutex poisoned")?;
        Ok(inner.get(prefix).copied())
    }

    fn put(
        &self,
        prefix: &str,
        value: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut inner = self.inner.lock().map_err(|_| "counter store mutex poisoned")?;
        inner.insert(prefix.to_string(), value);
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut inner = self.inner.lock().map_err(|_| "counter store mutex poisoned")?;
        inner.remove(prefix);
        Ok(())
    }
}
