//! Core library for the `tally` incident-log backend.
//!
//! A small data-entry and retrieval service: a form-submission endpoint
//! appends incident rows to a tabular store, and an authenticated read
//! endpoint exposes the rows as JSON for an external dashboard. The one
//! piece with a real design contract is the ID allocator in
//! [`allocator`], which hands out collision-resistant record IDs from
//! lock-guarded per-prefix sequence counters.

pub mod adapters;
pub mod allocator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ports;
pub mod record;
pub mod service;
pub mod web;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["tally", "unknown"]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_errors_without_subcommand() {
        let result = run(["tally"]).await;
        assert!(result.is_err());
    }
}
