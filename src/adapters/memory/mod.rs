//! In-memory adapters for tests and `TALLY_STORE=memory` demo runs.

pub mod clock;
pub mod counter_store;
pub mod record_store;

pub use clock::FixedClock;
pub use counter_store::MemoryCounterStore;
pub use record_store::MemoryRecordStore;
