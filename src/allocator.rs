//! Record ID allocation from per-prefix sequence counters.
//!
//! An ID is a two-letter prefix derived from the student identifier
//! plus a zero-padded 4-digit suffix drawn from a persisted counter for
//! that prefix. The counter read-modify-write is not atomic — callers
//! must hold the creation lock (see `service`) while allocating, or two
//! concurrent submissions can draw the same suffix.

use std::collections::HashSet;

use rand::Rng;

use crate::ports::counter_store::CounterStore;

/// Filler letter used when an identifier yields fewer than two letters.
const FILLER: char = 'X';
/// Counter values wrap after this many allocations per prefix.
const SUFFIX_SPAN: u32 = 10_000;
/// Sequential attempts before giving up and drawing a random suffix.
const MAX_ATTEMPTS: usize = 5;

/// Allocates unique record IDs against an injected counter store.
pub struct IdAllocator<'a> {
    counters: &'a dyn CounterStore,
    separator: String,
}

impl<'a> IdAllocator<'a> {
    /// Creates an allocator over `counters`, joining prefix and suffix
    /// with `separator` (empty string or `"-"`).
    #[must_use]
    pub fn new(counters: &'a dyn CounterStore, separator: &str) -> Self {
        Self { counters, separator: separator.to_string() }
    }

    /// Returns a record ID not present in `existing_ids`, best effort.
    ///
    /// Draws up to five sequential suffixes for the
    /// identifier's prefix, advancing the persisted counter on every
    /// draw whether or not the candidate is used. If all attempts
    /// collide — the counter space for that prefix is nearly exhausted
    /// and fragmented — falls back to a uniformly random 4-digit suffix
    /// without re-checking `existing_ids`. The fallback can therefore
    /// still collide; that residual risk is accepted rather than
    /// surfaced, and this method never fails.
    pub fn allocate(&self, raw_identifier: &str, existing_ids: &HashSet<String>) -> String {
        let prefix = two_letter_prefix(raw_identifier);
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.compose(&prefix, &self.next_suffix(&prefix));
            if !existing_ids.contains(&candidate) {
                return candidate;
            }
        }
        let random: u32 = rand::thread_rng().gen_range(0..SUFFIX_SPAN);
        self.compose(&prefix, &format!("{random:04}"))
    }

    /// Advances the persisted counter for `prefix` and returns the new
    /// value as a zero-padded 4-digit suffix.
    ///
    /// Not idempotent: every call moves shared state. Counter-store
    /// failures are logged and treated as an unset counter so that
    /// allocation still returns an ID.
    fn next_suffix(&self, prefix: &str) -> String {
        let current = match self.counters.get(prefix) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                eprintln!("counter read failed for {prefix}: {e}");
                0
            }
        };
        let next = (current + 1) % SUFFIX_SPAN;
        if let Err(e) = self.counters.put(prefix, next) {
            eprintln!("counter write failed for {prefix}: {e}");
        }
        format!("{next:04}")
    }

    fn compose(&self, prefix: &str, suffix: &str) -> String {
        format!("{prefix}{}{suffix}", self.separator)
    }
}

/// Derives the two-letter ID prefix from a raw identifier.
///
/// Strips everything but ASCII letters, uppercases, and takes the first
/// two. One remaining letter is padded with `X`; none at all yields the
/// sentinel `XX`.
#[must_use]
pub fn two_letter_prefix(raw_identifier: &str) -> String {
    let letters: String = raw_identifier
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(2)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    match letters.len() {
        0 => format!("{FILLER}{FILLER}"),
        1 => format!("{letters}{FILLER}"),
        _ => letters,
    }
}
