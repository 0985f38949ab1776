//! Paper trading API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::RwLock;

use super::signals::BarsRequest;
use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::PaperTrader;
use crate::types::{PaperAccountSummary, PaperEvaluation};
use crate::AppState;

/// Create the paper trading router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_account))
        .route("/reset", post(reset_account))
        .route("/:symbol/evaluate", post(evaluate))
}

fn paper_account(state: &AppState) -> Result<Arc<RwLock<PaperTrader>>> {
    state
        .paper
        .clone()
        .ok_or_else(|| AppError::NotFound("paper trading is disabled".to_string()))
}

/// Current paper account.
async fn get_account(State(state): State<AppState>) -> Result<Json<ApiResponse<PaperAccountSummary>>> {
    let account = paper_account(&state)?;
    let summary = account.read().await.summary();
    Ok(Json(ApiResponse::new(summary)))
}

/// Reset the paper account to its starting balance.
async fn reset_account(State(state): State<AppState>) -> Result<Json<ApiResponse<PaperAccountSummary>>> {
    let account = paper_account(&state)?;
    let mut trader = account.write().await;
    trader.reset();
    Ok(Json(ApiResponse::new(trader.summary())))
}

/// Classify the latest bar and let the paper account act on it.
async fn evaluate(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<BarsRequest>,
) -> Result<Json<ApiResponse<PaperEvaluation>>> {
    let account = paper_account(&state)?;
    let snapshot = state.signals.snapshot(Some(&symbol), &request.bars)?;

    let mut trader = account.write().await;
    let action = trader.apply(&symbol, &snapshot)?;
    let summary = trader.summary();

    Ok(Json(ApiResponse::new(PaperEvaluation {
        snapshot,
        action,
        account: summary,
    })))
}
