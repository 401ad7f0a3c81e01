//! `tally serve` command.

use std::sync::Arc;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::service::IncidentService;
use crate::web::{self, AppState};

/// Start the HTTP service on the configured (or overridden) address.
///
/// # Errors
///
/// Returns an error if the read token is unset, the backing store is
/// missing, or the server fails to bind.
pub async fn run(config: &Config, bind_override: Option<&str>) -> Result<(), String> {
    let token = config
        .token
        .clone()
        .ok_or_else(|| "TALLY_TOKEN must be set to serve the read endpoint".to_string())?;
    let ctx = ServiceContext::from_config(config)?;
    let service = Arc::new(IncidentService::new(ctx, &config.separator));
    let addr = bind_override.unwrap_or(&config.bind);
    web::serve(addr, AppState::new(service, token)).await
}
