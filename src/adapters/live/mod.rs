//! Live adapters backed by the system clock and JSON files on disk.

pub mod clock;
pub mod counter_store;
pub mod record_store;

pub use clock::LiveClock;
pub use counter_store::FileCounterStore;
pub use record_store::FileRecordStore;
