//! Chart pattern detection on bar lows.

use super::Indicator;
use crate::error::{AppError, Result};
use crate::types::{validate_bars, Bar, ChartPattern};

/// Double-bottom detector.
///
/// Finds local minima of the lows, then reports a double bottom when the two
/// most recent minima are within `tolerance` of each other (relative to the
/// earlier one).
#[derive(Debug, Clone, Copy)]
pub struct DoubleBottom {
    order: usize,
    tolerance: f64,
}

impl Default for DoubleBottom {
    fn default() -> Self {
        Self {
            order: 10,
            tolerance: 0.005,
        }
    }
}

impl DoubleBottom {
    pub fn new(order: usize, tolerance: f64) -> Self {
        Self { order, tolerance }
    }

    pub fn validate_params(&self) -> Result<()> {
        if self.order == 0 {
            return Err(AppError::InvalidArgument(
                "pattern order must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "pattern tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Indices whose low is strictly below every neighbour within `order` bars.
    ///
    /// Neighbour indices are clipped to the series bounds; a bar clipped onto
    /// itself fails the strict comparison, so the first and last bars never
    /// qualify.
    pub fn local_minima(lows: &[f64], order: usize) -> Vec<usize> {
        let n = lows.len();
        if n == 0 {
            return Vec::new();
        }
        let last = n - 1;

        (0..n)
            .filter(|&i| {
                (1..=order).all(|k| {
                    let after = (i + k).min(last);
                    let before = i.saturating_sub(k);
                    lows[i] < lows[after] && lows[i] < lows[before]
                })
            })
            .collect()
    }

    pub(crate) fn detect(&self, bars: &[Bar]) -> Vec<ChartPattern> {
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let minima = Self::local_minima(&lows, self.order);

        let mut patterns = Vec::new();
        if let [.., prev, last] = minima.as_slice() {
            let (prev_low, last_low) = (lows[*prev], lows[*last]);
            if prev_low != 0.0 && ((last_low - prev_low) / prev_low).abs() < self.tolerance {
                patterns.push(ChartPattern::DoubleBottom);
            }
        }
        patterns
    }
}

impl Indicator for DoubleBottom {
    type Output = Vec<ChartPattern>;

    fn id(&self) -> &str {
        "double_bottom"
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<ChartPattern>> {
        self.validate_params()?;
        validate_bars(bars)?;
        Ok(self.detect(bars))
    }
}
