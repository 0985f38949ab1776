use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// OHLCV bar. `time` is a unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Midpoint of the bar's range.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Check the fields the indicators read. `index` is only used for the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(AppError::malformed(index, format!("non-finite {}", name)));
            }
        }

        if self.high < self.low {
            return Err(AppError::malformed(
                index,
                format!("high {} below low {}", self.high, self.low),
            ));
        }

        Ok(())
    }
}

/// Validate a whole series once, before any recurrence runs over it.
///
/// Rejects non-finite fields, inverted ranges and timestamps that go backwards.
/// Equal timestamps are tolerated.
pub fn validate_bars(bars: &[Bar]) -> Result<()> {
    for (index, bar) in bars.iter().enumerate() {
        bar.validate(index)?;
        if index > 0 && bar.time < bars[index - 1].time {
            return Err(AppError::malformed(
                index,
                format!(
                    "timestamp {} precedes previous bar at {}",
                    bar.time,
                    bars[index - 1].time
                ),
            ));
        }
    }
    Ok(())
}
