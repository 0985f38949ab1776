//! Liveness endpoint reporting the active signal settings.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::types::{SignalThresholds, SupertrendParams};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    supertrend: SupertrendParams,
    rsi_period: usize,
    thresholds: SignalThresholds,
    paper_enabled: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.signals.settings();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        supertrend: settings.supertrend,
        rsi_period: settings.rsi_period,
        thresholds: settings.thresholds,
        paper_enabled: state.paper.is_some(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
