use serde::{Deserialize, Serialize};

/// Supertrend output for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Timestamp of the source bar.
    pub time: i64,
    /// Final (ratcheted) upper band.
    pub upper_band: f64,
    /// Final (ratcheted) lower band.
    pub lower_band: f64,
    /// True while the series is in an uptrend.
    pub in_uptrend: bool,
    /// Lower band in an uptrend, upper band in a downtrend.
    pub trend_value: f64,
}

/// Supertrend parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupertrendParams {
    /// ATR smoothing period (alpha = 1 / period).
    pub period: usize,
    /// Band width in ATRs.
    pub multiplier: f64,
}

impl Default for SupertrendParams {
    fn default() -> Self {
        Self {
            period: 10,
            multiplier: 3.0,
        }
    }
}
