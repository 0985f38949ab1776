//! Trading signals service module.
//!
//! Runs the Supertrend, RSI and pattern indicators over a bar series and
//! classifies the latest bar into a display signal.

pub mod indicators;

pub use indicators::{compute, Atr, DoubleBottom, Indicator, Rsi, Supertrend};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{validate_bars, Bar, DisplaySignal, SignalSnapshot, SignalThresholds, SupertrendParams};

/// Classify a display signal from trend state and RSI.
///
/// | trend | RSI          | signal      |
/// |-------|--------------|-------------|
/// | up    | > buy_rsi    | STRONG BUY  |
/// | down  | < sell_rsi   | STRONG SELL |
/// | else  |              | WAIT        |
///
/// A missing RSI never produces a trade signal.
pub fn classify(in_uptrend: bool, rsi: Option<f64>, thresholds: &SignalThresholds) -> DisplaySignal {
    match rsi {
        Some(rsi) if in_uptrend && rsi > thresholds.buy_rsi => DisplaySignal::StrongBuy,
        Some(rsi) if !in_uptrend && rsi < thresholds.sell_rsi => DisplaySignal::StrongSell,
        _ => DisplaySignal::Wait,
    }
}

/// Indicator parameters used to build a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SignalSettings {
    pub supertrend: SupertrendParams,
    pub rsi_period: usize,
    pub thresholds: SignalThresholds,
    pub patterns: DoubleBottom,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            supertrend: SupertrendParams::default(),
            rsi_period: 14,
            thresholds: SignalThresholds::default(),
            patterns: DoubleBottom::default(),
        }
    }
}

impl SignalSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            supertrend: config.supertrend,
            rsi_period: config.rsi_period,
            thresholds: config.thresholds,
            patterns: DoubleBottom::new(config.pattern_order, config.pattern_tolerance),
        }
    }

    pub fn validate(&self) -> Result<()> {
        Supertrend::validate_params(&self.supertrend)?;
        indicators::ensure_period(self.rsi_period)?;
        self.thresholds.validate()?;
        self.patterns.validate_params()
    }
}

/// Builds signal snapshots from bar series.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    settings: SignalSettings,
}

impl SignalEngine {
    /// Create an engine, rejecting settings the indicators cannot use.
    pub fn new(settings: SignalSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SignalSettings {
        &self.settings
    }

    /// Compute indicators over `bars` and classify the last bar.
    pub fn snapshot(&self, symbol: Option<&str>, bars: &[Bar]) -> Result<SignalSnapshot> {
        let last = bars.last().ok_or(AppError::EmptyInput)?;
        validate_bars(bars)?;

        let params = self.settings.supertrend;
        let atr = Atr::series(bars, params.period)?;
        let trend = Supertrend::series(bars, &atr, params.multiplier)?;
        let rsi = Rsi::last(bars, self.settings.rsi_period)?;
        let patterns = self.settings.patterns.detect(bars);

        let (point, atr) = match (trend.last(), atr.last()) {
            (Some(point), Some(atr)) => (*point, *atr),
            _ => return Err(AppError::Internal("indicator series shorter than input".to_string())),
        };
        let signal = classify(point.in_uptrend, rsi, &self.settings.thresholds);

        Ok(SignalSnapshot {
            symbol: symbol.map(|s| s.to_uppercase()),
            time: last.time,
            close: last.close,
            rsi,
            in_uptrend: point.in_uptrend,
            trend_value: point.trend_value,
            upper_band: point.upper_band,
            lower_band: point.lower_band,
            atr,
            signal,
            patterns,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}
