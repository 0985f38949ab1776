use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendwatch::config::Config;
use trendwatch::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendwatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Supertrend period {} multiplier {}, RSI period {}, thresholds {}/{}",
        config.supertrend.period,
        config.supertrend.multiplier,
        config.rsi_period,
        config.thresholds.buy_rsi,
        config.thresholds.sell_rsi
    );
    if config.paper.enabled {
        info!(
            "Paper trading enabled with balance {}",
            config.paper.initial_balance
        );
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config)?;
    let app = trendwatch::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Trendwatch server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
