//! Environment-backed service configuration.

use std::env;
use std::path::PathBuf;

/// Which backing store the service context should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// JSON files under the data directory (the default).
    File,
    /// Process-local memory, for tests and demos.
    Memory,
}

/// Service configuration resolved from the environment.
///
/// A `.env` file in the working directory is honored. Only `serve`
/// requires the read token; the counter subcommands work without it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for the read endpoint (`TALLY_TOKEN`).
    pub token: Option<String>,
    /// Target table/tab identifier (`TALLY_TAB`), default `incidents`.
    pub tab: String,
    /// ID separator (`TALLY_SEPARATOR`), empty string or `-`.
    pub separator: String,
    /// Backing-store override (`TALLY_STORE`), `file` or `memory`.
    pub store: StoreKind,
    /// Directory holding the table and counter files (`TALLY_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Listen address (`TALLY_BIND`), default `127.0.0.1:8080`.
    pub bind: String,
}

impl Config {
    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TALLY_SEPARATOR` or `TALLY_STORE` holds an
    /// unsupported value.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let separator = env::var("TALLY_SEPARATOR").unwrap_or_default();
        if !matches!(separator.as_str(), "" | "-") {
            return Err(format!(
                "TALLY_SEPARATOR must be empty or \"-\", got {separator:?}"
            ));
        }

        let store = match env::var("TALLY_STORE").as_deref() {
            Err(_) | Ok("file") => StoreKind::File,
            Ok("memory") => StoreKind::Memory,
            Ok(other) => {
                return Err(format!("TALLY_STORE must be \"file\" or \"memory\", got {other:?}"))
            }
        };

        Ok(Self {
            token: env::var("TALLY_TOKEN").ok(),
            tab: env::var("TALLY_TAB").unwrap_or_else(|_| "incidents".to_string()),
            separator,
            store,
            data_dir: env::var("TALLY_DATA_DIR")
                .map_or_else(|_| PathBuf::from("data"), PathBuf::from),
            bind: env::var("TALLY_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
        })
    }

    /// Path of the table file for the configured tab.
    #[must_use]
    pub fn table_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.tab))
    }

    /// Path of the persisted counter file.
    #[must_use]
    pub fn counters_path(&self) -> PathBuf {
        self.data_dir.join("counters.json")
    }
}
