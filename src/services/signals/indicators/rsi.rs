//! Relative Strength Index (RSI) indicator.

use super::{ensure_period, Indicator};
use crate::error::{AppError, Result};
use crate::types::{validate_bars, Bar};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Average gain and loss are simple means over the last `period` close-to-close
/// changes, so the first value appears at index `period`.
/// Values range from 0-100:
/// - Above the buy threshold in an uptrend: strong buy
/// - Below the sell threshold in a downtrend: strong sell
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// RSI for each bar over already validated input.
    pub(crate) fn series(bars: &[Bar], period: usize) -> Result<Vec<Option<f64>>> {
        let mut values = vec![None; bars.len()];
        if bars.len() <= period {
            return Ok(values);
        }

        let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();
        if let Some(j) = changes.iter().position(|c| !c.is_finite()) {
            return Err(AppError::malformed(j + 1, "close-to-close change overflows"));
        }

        // changes[j] is the move into bar j + 1
        for (i, value) in values.iter_mut().enumerate().skip(period) {
            let window = &changes[i - period..i];
            let (gain, loss) = window.iter().fold((0.0, 0.0), |(g, l), change| {
                if *change > 0.0 {
                    (g + change, l)
                } else {
                    (g, l - change)
                }
            });
            *value = Some(Self::from_averages(
                gain / period as f64,
                loss / period as f64,
            ));
        }

        Ok(values)
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            // Flat window carries no momentum either way
            return if avg_gain == 0.0 { 50.0 } else { 100.0 };
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }

    /// Latest RSI value, if the series is long enough.
    pub(crate) fn last(bars: &[Bar], period: usize) -> Result<Option<f64>> {
        Ok(Self::series(bars, period)?.last().copied().flatten())
    }
}

impl Indicator for Rsi {
    type Output = Vec<Option<f64>>;

    fn id(&self) -> &str {
        "rsi"
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<f64>>> {
        ensure_period(self.period)?;
        validate_bars(bars)?;
        Self::series(bars, self.period)
    }
}
