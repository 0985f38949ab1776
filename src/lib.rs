//! Trendwatch - Supertrend trend-state, RSI signal and paper-trading service

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::Result;
use services::{PaperTrader, SignalEngine, SignalSettings};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub signals: Arc<SignalEngine>,
    /// None when paper trading is disabled.
    pub paper: Option<Arc<RwLock<PaperTrader>>>,
}

impl AppState {
    /// Build the shared services, rejecting an unusable configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let signals = SignalEngine::new(SignalSettings::from_config(&config))?;
        let paper = if config.paper.enabled {
            Some(Arc::new(RwLock::new(PaperTrader::new(config.paper)?)))
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            signals: Arc::new(signals),
            paper,
        })
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use error::AppError;
pub use services::signals::compute;
pub use types::*;
