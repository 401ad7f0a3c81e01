//! HTTP surface: create, read, and diagnostic endpoints.
//!
//! Every response is HTTP 200 — the external dashboard treats any
//! non-200 as a transport failure before parsing, so auth and server
//! errors ride in the body (`{"error": "forbidden"}`,
//! `{"error": "server_error", ...}`).

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::record::IncidentInput;
use crate::service::IncidentService;

/// Fixed acknowledgement returned by the diagnostic path.
const ACK: &str = "tally backend is live";
/// `mode` value selecting JSON output on the read path.
const JSON_MODE: &str = "json";

/// Shared state behind the router.
#[derive(Clone)]
pub struct AppState {
    service: Arc<IncidentService>,
    token: String,
}

impl AppState {
    /// Bundles the service and the configured read token.
    #[must_use]
    pub fn new(service: Arc<IncidentService>, token: String) -> Self {
        Self { service, token }
    }
}

/// Query parameters of the read endpoint.
#[derive(Debug, Deserialize)]
pub struct ReadParams {
    /// Output selector; must equal `json` for record output.
    #[serde(default)]
    pub mode: Option<String>,
    /// Shared secret matched against the configured token.
    #[serde(default)]
    pub token: Option<String>,
}

/// Builds the service router: `GET /` (read or diagnostic) and
/// `POST /` (create).
pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(handle_get).post(handle_post)).with_state(state)
}

/// Binds `addr` and serves the router until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(addr: &str, state: AppState) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;
    println!("tally listening on http://{addr}");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| format!("server error: {e}"))
}

/// Outcome of the GET path: diagnostic acknowledgement or a JSON body.
enum GetReply {
    Ack,
    Body(Value),
}

async fn handle_get(State(state): State<AppState>, Query(params): Query<ReadParams>) -> Response {
    match get_reply(&state, &params).await {
        GetReply::Ack => ACK.into_response(),
        GetReply::Body(body) => Json(body).into_response(),
    }
}

/// Dispatches a GET between the diagnostic ack and the JSON read path.
async fn get_reply(state: &AppState, params: &ReadParams) -> GetReply {
    if params.mode.as_deref() == Some(JSON_MODE) {
        GetReply::Body(read_json(state, params.token.as_deref()).await)
    } else {
        GetReply::Ack
    }
}

async fn handle_post(
    State(state): State<AppState>,
    Json(input): Json<IncidentInput>,
) -> Json<Value> {
    Json(create_json(&state, input).await)
}

/// Builds the read-endpoint body: forbidden, data, or server error.
async fn read_json(state: &AppState, token: Option<&str>) -> Value {
    if token != Some(state.token.as_str()) {
        return json!({ "error": "forbidden" });
    }
    match state.service.snapshot().await {
        Ok((header, incidents)) => {
            if incidents.is_empty() {
                json!({ "data": [], "header": header })
            } else {
                json!({ "data": incidents })
            }
        }
        Err(message) => json!({ "error": "server_error", "message": message }),
    }
}

/// Builds the create-endpoint body.
async fn create_json(state: &AppState, input: IncidentInput) -> Value {
    match state.service.create(input).await {
        Ok(id) => json!({ "ok": true, "incident_id": id }),
        Err(message) => json!({ "error": "server_error", "message": message }),
    }
}
