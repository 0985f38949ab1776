//! Signal API endpoints.

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::ApiResponse;
use crate::error::Result;
use crate::types::{Bar, SignalSnapshot};
use crate::AppState;

/// Request body carrying a bar series.
#[derive(Debug, Deserialize)]
pub struct BarsRequest {
    pub bars: Vec<Bar>,
}

/// Create the signals router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:symbol", post(get_signal))
}

/// Classify the latest bar for a symbol.
async fn get_signal(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<BarsRequest>,
) -> Result<Json<ApiResponse<SignalSnapshot>>> {
    let snapshot = state.signals.snapshot(Some(&symbol), &request.bars)?;
    debug!("{}: {} (rsi {:?})", symbol, snapshot.signal, snapshot.rsi);

    Ok(Json(ApiResponse::new(snapshot)))
}
