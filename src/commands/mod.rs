//! Command dispatch and handlers.

pub mod counter;
pub mod init;
pub mod serve;

use crate::cli::Command;
use crate::config::Config;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if configuration cannot be resolved or the
/// selected command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env()?;
    match command {
        Command::Serve { bind } => serve::run(&config, bind.as_deref()).await,
        Command::Init => init::run(&config),
        Command::Counter { action } => counter::run(&config, action),
    }
}
