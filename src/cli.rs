//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `tally`.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Log and serve behavioral incident records")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP service.
    Serve {
        /// Listen address, overriding `TALLY_BIND`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Seed the table file for a fresh data directory.
    Init,
    /// Inspect or reset the persisted sequence counters.
    Counter {
        /// The counter operation to perform.
        #[command(subcommand)]
        action: CounterAction,
    },
}

/// Administrative operations on the per-prefix sequence counters.
///
/// These act directly on the persisted counter map without taking the
/// creation lock; do not run them while the service is accepting
/// submissions for the same prefix.
#[derive(Debug, Subcommand)]
pub enum CounterAction {
    /// Print the current counter value for a prefix.
    Get {
        /// Two-letter prefix, e.g. `AL`.
        prefix: String,
    },
    /// Clear the counter for a prefix; the next allocation restarts at 0001.
    Reset {
        /// Two-letter prefix, e.g. `AL`.
        prefix: String,
    },
}
