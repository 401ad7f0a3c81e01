//! `tally counter` commands.
//!
//! Direct, unguarded access to the persisted counter map — do not run
//! these while the service is accepting submissions for the same
//! prefix.

use crate::adapters::live::FileCounterStore;
use crate::cli::CounterAction;
use crate::config::Config;
use crate::ports::counter_store::CounterStore;

/// Execute a counter subcommand against the persisted counter file.
///
/// # Errors
///
/// Returns an error string if the counter file cannot be read or
/// written.
pub fn run(config: &Config, action: &CounterAction) -> Result<(), String> {
    let store = FileCounterStore::new(&config.counters_path());
    match action {
        CounterAction::Get { prefix } => {
            let value = store
                .get(prefix)
                .map_err(|e| format!("failed to read counter {prefix}: {e}"))?;
            match value {
                Some(value) => println!("{prefix}: {value}"),
                None => println!("{prefix}: unset"),
            }
            Ok(())
        }
        CounterAction::Reset { prefix } => {
            store.clear(prefix).map_err(|e| format!("failed to reset counter {prefix}: {e}"))?;
            println!("{prefix}: reset");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::StoreKind;

    fn config(data_dir: PathBuf) -> Config {
        Config {
            token: None,
            tab: "incidents".to_string(),
            separator: String::new(),
            store: StoreKind::File,
            data_dir,
            bind: "127.0.0.1:8080".to_string(),
        }
    }

    #[test]
    fn get_and_reset_run_against_a_fresh_directory() {
        let dir = std::env::temp_dir().join("tally_cmd_counter");
        let _ = std::fs::remove_dir_all(&dir);
        let config = config(dir.clone());

        run(&config, &CounterAction::Get { prefix: "AL".to_string() }).unwrap();
        run(&config, &CounterAction::Reset { prefix: "AL".to_string() }).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reset_clears_a_set_counter() {
        let dir = std::env::temp_dir().join("tally_cmd_counter_reset");
        let _ = std::fs::remove_dir_all(&dir);
        let config = config(dir.clone());

        let store = FileCounterStore::new(&config.counters_path());
        store.put("AL", 17).unwrap();
        run(&config, &CounterAction::Reset { prefix: "AL".to_string() }).unwrap();
        assert_eq!(store.get("AL").unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
