//! Average True Range (ATR) indicator.

use super::{ensure_period, Indicator};
use crate::error::{AppError, Result};
use crate::types::{validate_bars, Bar};

/// ATR (Average True Range) indicator.
///
/// Measures market volatility by smoothing the true range:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
///
/// The first bar has no previous close, so its TR is just High-Low.
/// Smoothing is an exponential moving average with alpha = 1/period seeded
/// with the first TR, so short series produce under-smoothed values rather
/// than gaps.
#[derive(Debug, Clone, Copy)]
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 10 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Calculate True Range.
    fn true_range(current: &Bar, previous: &Bar) -> f64 {
        let hl = current.high - current.low;
        let hc = (current.high - previous.close).abs();
        let lc = (current.low - previous.close).abs();
        hl.max(hc).max(lc)
    }

    /// Calculate the ATR series over bars that are already validated.
    ///
    /// Finite bars can still overflow the range arithmetic (e.g. a low of
    /// -1e308 under a high of 1e308); such a bar is rejected rather than let
    /// an infinite ATR turn into NaN on the next step.
    pub(crate) fn series(bars: &[Bar], period: usize) -> Result<Vec<f64>> {
        let alpha = 1.0 / period as f64;
        let mut values = Vec::with_capacity(bars.len());

        for (i, bar) in bars.iter().enumerate() {
            let atr = match values.last() {
                None => bar.high - bar.low,
                Some(&prev) => {
                    let tr = Self::true_range(bar, &bars[i - 1]);
                    prev + alpha * (tr - prev)
                }
            };
            if !atr.is_finite() {
                return Err(AppError::malformed(i, "true range overflows"));
            }
            values.push(atr);
        }

        Ok(values)
    }
}

/// True range for every bar, with TR[0] = high[0] - low[0].
pub fn true_range_series(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| match i {
            0 => bar.high - bar.low,
            _ => Atr::true_range(bar, &bars[i - 1]),
        })
        .collect()
}

impl Indicator for Atr {
    type Output = Vec<f64>;

    fn id(&self) -> &str {
        "atr"
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<f64>> {
        ensure_period(self.period)?;
        validate_bars(bars)?;
        Self::series(bars, self.period)
    }
}
