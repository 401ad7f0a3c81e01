//! Fixed clock returning a preset instant.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock pinned to a single instant, for deterministic timestamps in tests.
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `at`.
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
