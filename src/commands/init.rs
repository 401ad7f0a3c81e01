//! `tally init` command.

use crate::adapters::live::FileRecordStore;
use crate::config::Config;
use crate::record;

/// Seed the configured data directory with an empty table file.
///
/// # Errors
///
/// Returns an error if the table file already exists or cannot be
/// written.
pub fn run(config: &Config) -> Result<(), String> {
    let path = config.table_path();
    FileRecordStore::seed(&path, record::header())?;
    println!("created {}", path.display());
    Ok(())
}
