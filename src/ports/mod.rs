//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, the persisted counter map, the tabular record
//! store). Implementations live in `src/adapters/`.

pub mod clock;
pub mod counter_store;
pub mod record_store;

pub use clock::Clock;
pub use counter_store::CounterStore;
pub use record_store::RecordStore;
