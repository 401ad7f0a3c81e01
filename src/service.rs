//! Incident creation and read workflows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::spawn_blocking;
use tokio::time::timeout;

use crate::allocator::IdAllocator;
use crate::context::ServiceContext;
use crate::record::{Incident, IncidentInput};

/// Bounded wait for the creation lock before the attempt fails.
const LOCK_WAIT: Duration = Duration::from_secs(5);

/// Incident workflows over a [`ServiceContext`].
///
/// Creation serializes the existing-ID snapshot and the counter
/// increment behind one process-wide lock; reads take an unlocked
/// point-in-time snapshot and may miss a row that is concurrently
/// being appended. Store I/O runs on the blocking thread pool so the
/// file adapters never stall the async executor.
pub struct IncidentService {
    ctx: ServiceContext,
    separator: String,
    create_lock: Mutex<()>,
}

impl IncidentService {
    /// Creates the service over a wired context.
    #[must_use]
    pub fn new(ctx: ServiceContext, separator: &str) -> Self {
        Self { ctx, separator: separator.to_string(), create_lock: Mutex::new(()) }
    }

    /// Creates one incident record and returns its assigned ID.
    ///
    /// The lock covers exactly the existing-ID snapshot and the ID
    /// allocation; the row append happens after release to keep the
    /// critical section short. A lock timeout fails the attempt before
    /// any state changes, so the caller may simply retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired within the
    /// bounded wait or if the backing store fails while reading IDs or
    /// appending the row.
    pub async fn create(&self, input: IncidentInput) -> Result<String, String> {
        let id = {
            let _guard = timeout(LOCK_WAIT, self.create_lock.lock())
                .await
                .map_err(|_| "timed out waiting for the creation lock".to_string())?;
            let records = Arc::clone(&self.ctx.records);
            let counters = Arc::clone(&self.ctx.counters);
            let separator = self.separator.clone();
            let student_id = input.student_id.clone();
            spawn_blocking(move || -> Result<String, String> {
                let existing = records
                    .list_existing_ids()
                    .map_err(|e| format!("failed to read existing IDs: {e}"))?;
                let allocator = IdAllocator::new(counters.as_ref(), &separator);
                Ok(allocator.allocate(&student_id, &existing))
            })
            .await
            .map_err(|e| format!("allocation task failed: {e}"))??
        };

        let incident = Incident::from_input(id.clone(), self.ctx.clock.now(), input);
        let records = Arc::clone(&self.ctx.records);
        let row = incident.to_row();
        spawn_blocking(move || records.append_record(row))
            .await
            .map_err(|e| format!("append task failed: {e}"))?
            .map_err(|e| format!("failed to append incident {id}: {e}"))?;
        Ok(id)
    }

    /// Returns the table header and all assigned records.
    ///
    /// Rows with an empty ID cell are excluded; the rest parse through
    /// the shared field schema so numeric columns come back as numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or a row
    /// does not fit the record schema.
    pub async fn snapshot(&self) -> Result<(Vec<String>, Vec<Incident>), String> {
        let records = Arc::clone(&self.ctx.records);
        let (header, rows) = spawn_blocking(move || records.get_all_records())
            .await
            .map_err(|e| format!("snapshot task failed: {e}"))?
            .map_err(|e| format!("failed to read records: {e}"))?;
        let incidents = rows
            .iter()
            .filter(|row| row.first().is_some_and(|id| !id.is_empty()))
            .map(|row| Incident::from_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((header, incidents))
    }
}
