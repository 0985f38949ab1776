//! Technical indicator implementations.

pub mod atr;
pub mod patterns;
pub mod rsi;
pub mod supertrend;

pub use atr::{true_range_series, Atr};
pub use patterns::DoubleBottom;
pub use rsi::Rsi;
pub use supertrend::{compute, Supertrend};

use crate::error::{AppError, Result};
use crate::types::Bar;

/// Trait for implementing technical indicators over a bar series.
pub trait Indicator: Send + Sync {
    /// Per-series result.
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Validate inputs and calculate over the whole series.
    fn calculate(&self, bars: &[Bar]) -> Result<Self::Output>;
}

pub(crate) fn ensure_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(AppError::InvalidArgument(
            "period must be at least 1".to_string(),
        ));
    }
    Ok(())
}
