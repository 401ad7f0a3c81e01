//! Adapter implementations of the port traits.
//!
//! `live` adapters touch the real system clock and disk; `memory`
//! adapters keep everything in process and back tests and local demos
//! (selected via `TALLY_STORE=memory`).

pub mod live;
pub mod memory;
