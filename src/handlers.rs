use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::dispatcher::Dispatcher;
use crate::error::ErrorResponse;
use crate::health::HealthChecker;
use crate::response::GatewayResponse;

/// Shared application state
pub type SharedState = Arc<AppState>;

/// Application state containing the dispatcher and health checker
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub health: HealthChecker,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            health: HealthChecker::new(),
        }
    }
}

/// Inbound lookup envelope. Missing fields are treated as empty and left for
/// validation to reject.
#[derive(Debug, Default, Deserialize)]
pub struct LookupPayload {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

impl LookupPayload {
    async fn dispatch(self, dispatcher: &Dispatcher) -> GatewayResponse {
        let cep = self.cep.unwrap_or_default();
        let service = self.service.unwrap_or_default();
        dispatcher.handle(&cep, &service).await
    }
}

/// Look up a CEP from a JSON body
pub async fn lookup_json(
    State(state): State<SharedState>,
    payload: Result<Json<LookupPayload>, JsonRejection>,
) -> GatewayResponse {
    match payload {
        Ok(Json(payload)) => payload.dispatch(&state.dispatcher).await,
        Err(rejection) => bad_request("Rejected lookup body", rejection.body_text()),
    }
}

/// Look up a CEP from query parameters
pub async fn lookup_query(
    State(state): State<SharedState>,
    payload: Result<Query<LookupPayload>, QueryRejection>,
) -> GatewayResponse {
    match payload {
        Ok(Query(payload)) => payload.dispatch(&state.dispatcher).await,
        Err(rejection) => bad_request("Rejected lookup query", rejection.body_text()),
    }
}

fn bad_request(context: &str, detail: String) -> GatewayResponse {
    tracing::debug!(error = %detail, "{context}");
    GatewayResponse::error(StatusCode::BAD_REQUEST, ErrorResponse::new(detail))
}

/// Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.health.check_health(&state.dispatcher))
}
