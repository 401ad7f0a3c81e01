//! Counter store port for the persisted per-prefix sequence counters.

/// Persisted map from two-letter prefix to sequence counter.
///
/// Owned exclusively by the ID allocator: no other component writes
/// counter values. The store itself performs no locking — callers must
/// serialize read-modify-write cycles for a given prefix (see the
/// creation workflow in `service`).
pub trait CounterStore: Send + Sync {
    /// Returns the persisted counter for `prefix`, or `None` if never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, prefix: &str) -> Result<Option<u32>, Box<dyn std::error::Error + Send + Sync>>;

    /// Persists `value` as the counter for `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn put(&self, prefix: &str, value: u32) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Removes the counter for `prefix`; the next allocation restarts from 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self, prefix: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
