use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Display signal derived from trend state and RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySignal {
    StrongBuy,
    StrongSell,
    Wait,
}

impl DisplaySignal {
    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            DisplaySignal::StrongBuy => "STRONG BUY",
            DisplaySignal::StrongSell => "STRONG SELL",
            DisplaySignal::Wait => "WAIT / SIDEWAYS",
        }
    }
}

impl std::fmt::Display for DisplaySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// RSI thresholds for the display signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalThresholds {
    /// Uptrend plus RSI strictly above this is a strong buy.
    pub buy_rsi: f64,
    /// Downtrend plus RSI strictly below this is a strong sell.
    pub sell_rsi: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy_rsi: 55.0,
            sell_rsi: 45.0,
        }
    }
}

impl SignalThresholds {
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(self.buy_rsi) || !in_range(self.sell_rsi) {
            return Err(AppError::InvalidArgument(format!(
                "RSI thresholds must lie in [0, 100], got buy={} sell={}",
                self.buy_rsi, self.sell_rsi
            )));
        }
        if self.sell_rsi > self.buy_rsi {
            return Err(AppError::InvalidArgument(format!(
                "sell threshold {} exceeds buy threshold {}",
                self.sell_rsi, self.buy_rsi
            )));
        }
        Ok(())
    }
}

/// Chart patterns recognised on bar lows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartPattern {
    DoubleBottom,
}

impl ChartPattern {
    pub fn label(&self) -> &'static str {
        match self {
            ChartPattern::DoubleBottom => "Double Bottom (Bullish)",
        }
    }
}

/// Everything the dashboard needs to render the latest bar's signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSnapshot {
    /// Symbol this data is for, if the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Timestamp of the last bar.
    pub time: i64,
    /// Close of the last bar.
    pub close: f64,
    /// RSI at the last bar; None when there are too few bars.
    pub rsi: Option<f64>,
    pub in_uptrend: bool,
    pub trend_value: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    /// ATR at the last bar.
    pub atr: f64,
    pub signal: DisplaySignal,
    pub patterns: Vec<ChartPattern>,
    /// Unix timestamp (milliseconds) when calculated.
    pub timestamp: i64,
}
