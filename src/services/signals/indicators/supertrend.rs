//! Supertrend trend-state indicator.

use super::{ensure_period, Atr, Indicator};
use crate::error::{AppError, Result};
use crate::types::{validate_bars, Bar, SupertrendParams, TrendPoint};

/// Supertrend indicator.
///
/// Volatility bands around the bar midpoint:
/// - Upper Band = HL2 + (multiplier × ATR)
/// - Lower Band = HL2 - (multiplier × ATR)
///
/// A close above the previous upper band starts an uptrend, a close below the
/// previous lower band starts a downtrend. Between the bands the trend carries
/// over. While a trend persists the band that protects it may only tighten:
/// the lower band never drops during an uptrend and the upper band never rises
/// during a downtrend.
///
/// The first bar has no history and is seeded as an uptrend with raw bands.
#[derive(Debug, Clone, Copy)]
pub struct Supertrend {
    params: SupertrendParams,
}

impl Default for Supertrend {
    fn default() -> Self {
        Self {
            params: SupertrendParams::default(),
        }
    }
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            params: SupertrendParams { period, multiplier },
        }
    }

    pub fn params(&self) -> SupertrendParams {
        self.params
    }

    /// Reject parameters the recurrence cannot use.
    pub fn validate_params(params: &SupertrendParams) -> Result<()> {
        ensure_period(params.period)?;
        if !params.multiplier.is_finite() || params.multiplier <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "multiplier must be a positive finite number, got {}",
                params.multiplier
            )));
        }
        Ok(())
    }

    /// Run the recurrence over validated bars with a precomputed ATR series.
    ///
    /// A raw band that overflows is rejected before it reaches the ratchet
    /// comparisons.
    pub(crate) fn series(bars: &[Bar], atr: &[f64], multiplier: f64) -> Result<Vec<TrendPoint>> {
        let mut points = Vec::with_capacity(bars.len());

        // (prev_upper, prev_lower, prev_uptrend)
        let mut prev: Option<(f64, f64, bool)> = None;

        for (index, (bar, atr)) in bars.iter().zip(atr).enumerate() {
            let hl2 = bar.hl2();
            let mut upper = hl2 + multiplier * atr;
            let mut lower = hl2 - multiplier * atr;
            if !upper.is_finite() || !lower.is_finite() {
                return Err(AppError::malformed(index, "band overflows"));
            }

            let in_uptrend = match prev {
                None => true,
                Some((prev_upper, prev_lower, prev_uptrend)) => {
                    let in_uptrend = if bar.close > prev_upper {
                        true
                    } else if bar.close < prev_lower {
                        false
                    } else {
                        prev_uptrend
                    };

                    // Ratchet only while the trend persists; a flip starts from raw bands
                    if in_uptrend == prev_uptrend {
                        if in_uptrend && lower < prev_lower {
                            lower = prev_lower;
                        }
                        if !in_uptrend && upper > prev_upper {
                            upper = prev_upper;
                        }
                    }
                    in_uptrend
                }
            };

            points.push(TrendPoint {
                time: bar.time,
                upper_band: upper,
                lower_band: lower,
                in_uptrend,
                trend_value: if in_uptrend { lower } else { upper },
            });
            prev = Some((upper, lower, in_uptrend));
        }

        Ok(points)
    }
}

impl Indicator for Supertrend {
    type Output = Vec<TrendPoint>;

    fn id(&self) -> &str {
        "supertrend"
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<TrendPoint>> {
        compute(bars, self.params.period, self.params.multiplier)
    }
}

/// Compute the Supertrend bands and trend state for every bar.
///
/// Output has the same length and order as `bars`; an empty series yields an
/// empty result. Fails fast on a zero period, a non-positive multiplier, a
/// malformed bar, or a bar whose range overflows, so NaN never reaches the
/// band comparisons.
pub fn compute(bars: &[Bar], period: usize, multiplier: f64) -> Result<Vec<TrendPoint>> {
    Supertrend::validate_params(&SupertrendParams { period, multiplier })?;
    validate_bars(bars)?;

    let atr = Atr::series(bars, period)?;
    Supertrend::series(bars, &atr, multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(i: i64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(i * 60_000, close, high, low, close, 1000.0)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_supertrend_id() {
        let st = Supertrend::default();
        assert_eq!(st.id(), "supertrend");
        assert_eq!(st.params().period, 10);
        assert_eq!(st.params().multiplier, 3.0);
    }

    #[test]
    fn test_empty_series() {
        assert!(compute(&[], 10, 3.0).unwrap().is_empty());
    }

    #[test]
    fn test_single_bar_uses_raw_bands() {
        let points = compute(&[bar(0, 105.0, 95.0, 100.0)], 10, 2.0).unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0].in_uptrend);
        assert_close(points[0].upper_band, 100.0 + 2.0 * 10.0);
        assert_close(points[0].lower_band, 100.0 - 2.0 * 10.0);
        assert_close(points[0].trend_value, points[0].lower_band);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(
            compute(&[bar(0, 101.0, 99.0, 100.0)], 0, 3.0),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bad_multiplier_rejected() {
        let bars = [bar(0, 101.0, 99.0, 100.0)];
        for multiplier in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                compute(&bars, 10, multiplier),
                Err(AppError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_nan_bar_rejected() {
        let bars = [bar(0, 101.0, 99.0, 100.0), bar(1, f64::NAN, 99.0, 100.0)];
        assert!(matches!(
            compute(&bars, 10, 3.0),
            Err(AppError::MalformedBar { index: 1, .. })
        ));
    }

    #[test]
    fn test_overflowing_band_rejected() {
        // range is zero but the midpoint overflows
        let bars = [bar(0, 101.0, 99.0, 100.0), bar(1, f64::MAX, f64::MAX, f64::MAX)];
        assert!(matches!(
            compute(&bars, 10, 3.0),
            Err(AppError::MalformedBar { index: 1, .. })
        ));
    }

    #[test]
    fn test_breakdown_then_ratchet_down() {
        let bars = [
            bar(0, 101.0, 99.0, 100.0),
            bar(1, 96.0, 94.0, 95.0),
            bar(2, 96.0, 94.0, 95.0),
            bar(3, 96.5, 94.5, 95.5),
        ];
        let points = compute(&bars, 1, 1.0).unwrap();

        assert!(points[0].in_uptrend);
        assert!(!points[1].in_uptrend);
        assert_close(points[1].upper_band, 101.0);
        assert_close(points[2].upper_band, 97.0);
        // raw upper at bar 3 is 97.5, held at 97 while the downtrend lasts
        assert_close(points[3].upper_band, 97.0);
        assert_close(points[3].trend_value, 97.0);
    }

    #[test]
    fn test_breakout_in_trend_direction_keeps_ratchet() {
        // wide bar closes above the upper band while already up; raw lower is 25
        let bars = [bar(0, 101.0, 99.0, 100.0), bar(1, 130.0, 60.0, 125.0)];
        let points = compute(&bars, 1, 1.0).unwrap();

        assert!(points[1].in_uptrend);
        assert_close(points[1].upper_band, 165.0);
        assert_close(points[1].lower_band, 98.0);
    }

    #[test]
    fn test_trend_value_follows_state() {
        let bars: Vec<Bar> = (0..30)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.7).sin() * 5.0;
                bar(i, base + 1.0, base - 1.0, base)
            })
            .collect();
        for p in compute(&bars, 5, 1.5).unwrap() {
            let expected = if p.in_uptrend { p.lower_band } else { p.upper_band };
            assert_eq!(p.trend_value, expected);
        }
    }
}
