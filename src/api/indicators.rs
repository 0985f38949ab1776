//! Indicator API endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiResponse;
use crate::error::Result;
use crate::services::signals::{Indicator, Rsi, Supertrend};
use crate::types::{Bar, TrendPoint};
use crate::AppState;

/// Request body for the Supertrend endpoint.
#[derive(Debug, Deserialize)]
pub struct SupertrendRequest {
    pub bars: Vec<Bar>,
    /// Overrides the configured ATR period.
    pub period: Option<usize>,
    /// Overrides the configured band multiplier.
    pub multiplier: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupertrendResponse {
    pub period: usize,
    pub multiplier: f64,
    pub points: Vec<TrendPoint>,
}

/// Request body for the RSI endpoint.
#[derive(Debug, Deserialize)]
pub struct RsiRequest {
    pub bars: Vec<Bar>,
    pub period: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RsiResponse {
    pub period: usize,
    pub values: Vec<Option<f64>>,
}

/// Create the indicators router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/supertrend", post(supertrend))
        .route("/rsi", post(rsi))
}

/// Supertrend bands and trend state for every bar.
async fn supertrend(
    State(state): State<AppState>,
    Json(request): Json<SupertrendRequest>,
) -> Result<Json<ApiResponse<SupertrendResponse>>> {
    let defaults = state.signals.settings().supertrend;
    let indicator = Supertrend::new(
        request.period.unwrap_or(defaults.period),
        request.multiplier.unwrap_or(defaults.multiplier),
    );
    let params = indicator.params();

    let points = indicator.calculate(&request.bars)?;
    debug!(
        "Computed {} over {} bars (period {}, multiplier {})",
        indicator.id(),
        points.len(),
        params.period,
        params.multiplier
    );

    Ok(Json(ApiResponse::new(SupertrendResponse {
        period: params.period,
        multiplier: params.multiplier,
        points,
    })))
}

/// RSI for every bar; null until enough bars are available.
async fn rsi(
    State(state): State<AppState>,
    Json(request): Json<RsiRequest>,
) -> Result<Json<ApiResponse<RsiResponse>>> {
    let period = request.period.unwrap_or(state.signals.settings().rsi_period);
    let values = Rsi::new(period).calculate(&request.bars)?;

    Ok(Json(ApiResponse::new(RsiResponse { period, values })))
}
