//! Record store port for the tabular incident table.

use std::collections::HashSet;

/// Tabular backing store holding one header row plus incident rows.
///
/// The store enforces no uniqueness: it trusts the creation workflow to
/// have produced a unique ID via the allocator before appending.
pub trait RecordStore: Send + Sync {
    /// Returns the set of all non-empty values in the ID column.
    ///
    /// Used by the creation workflow to detect collisions before a
    /// candidate ID is returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing table cannot be read.
    fn list_existing_ids(
        &self,
    ) -> Result<HashSet<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Appends one row of field values to the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing table cannot be written.
    fn append_record(
        &self,
        row: Vec<String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns the header and all data rows as a point-in-time snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing table cannot be read.
    fn get_all_records(
        &self,
    ) -> Result<(Vec<String>, Vec<Vec<String>>), Box<dyn std::error::Error + Send + Sync>>;
}
